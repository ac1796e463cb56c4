//! Document saving
//!
//! Runs the build pass, so every linked reference carries its target's
//! current Serial, then serializes the document.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::SsrfConfig;
use crate::export::{ExportError, SsrfExporter};
use crate::format::FormatRegistry;
use crate::models::Document;
use crate::reference::{BuildReport, ReferenceResolver};

/// Serialized document with the build pass counts
#[derive(Debug)]
pub struct SavedDocument {
    pub content: String,
    pub build: BuildReport,
}

/// Saves SSRF documents: build pass, then export
#[derive(Debug, Clone)]
pub struct DocumentSaver<'r> {
    exporter: SsrfExporter<'r>,
    resolver: ReferenceResolver,
}

impl Default for DocumentSaver<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSaver<'static> {
    pub fn new() -> Self {
        Self::with_config(SsrfConfig::default())
    }

    pub fn with_config(config: SsrfConfig) -> Self {
        Self {
            exporter: SsrfExporter::with_config(config),
            resolver: ReferenceResolver::new(),
        }
    }
}

impl<'r> DocumentSaver<'r> {
    pub fn with_registry<'s>(self, registry: &'s FormatRegistry) -> DocumentSaver<'s> {
        DocumentSaver {
            exporter: self.exporter.with_registry(registry),
            resolver: self.resolver,
        }
    }

    /// Rebuild reference Serials and serialize.
    ///
    /// The document is updated in place: after saving, every linked
    /// reference's raw Serial matches its target.
    pub fn save_string(&self, document: &Document) -> Result<SavedDocument, ExportError> {
        let build = self.resolver.build(document);
        let exported = self.exporter.export(document)?;
        Ok(SavedDocument {
            content: exported.content,
            build,
        })
    }

    pub fn save_path(&self, document: &Document, path: impl AsRef<Path>) -> Result<BuildReport> {
        let path = path.as_ref();
        let saved = self
            .save_string(document)
            .with_context(|| format!("Failed to serialize document for {}", path.display()))?;
        std::fs::write(path, saved.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved document to {}", path.display());
        Ok(saved.build)
    }
}
