//! Document loading
//!
//! Parses SSRF XML and runs the resolution pass, so every reference whose
//! Serial exists in the document comes back linked to its target.

use anyhow::{Context, Result};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::config::SsrfConfig;
use crate::format::FormatRegistry;
use crate::import::{ImportError, SsrfImporter};
use crate::models::Document;
use crate::reference::{DanglingReference, ReferenceResolver, ResolutionReport};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("{} unresolved reference(s)", .0.len())]
    Unresolved(Vec<DanglingReference>),
}

/// A parsed and linked document
#[derive(Debug)]
pub struct LoadedDocument {
    pub document: Document,
    /// Field errors collected by the importer
    pub import_errors: Vec<ImportError>,
    pub resolution: ResolutionReport,
}

impl LoadedDocument {
    /// No import errors and no dangling references
    pub fn is_clean(&self) -> bool {
        self.import_errors.is_empty() && self.resolution.is_complete()
    }
}

/// Loads SSRF documents: import, then resolution pass
#[derive(Debug, Clone)]
pub struct DocumentLoader<'r> {
    importer: SsrfImporter<'r>,
    resolver: ReferenceResolver,
    require_resolved: bool,
}

impl Default for DocumentLoader<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLoader<'static> {
    pub fn new() -> Self {
        Self::with_config(SsrfConfig::default())
    }

    pub fn with_config(config: SsrfConfig) -> Self {
        Self {
            importer: SsrfImporter::with_config(config),
            resolver: ReferenceResolver::new(),
            require_resolved: false,
        }
    }
}

impl<'r> DocumentLoader<'r> {
    pub fn with_registry<'s>(self, registry: &'s FormatRegistry) -> DocumentLoader<'s> {
        DocumentLoader {
            importer: self.importer.with_registry(registry),
            resolver: self.resolver,
            require_resolved: self.require_resolved,
        }
    }

    /// Fail the load when any reference stays dangling
    pub fn require_resolved(mut self, require: bool) -> Self {
        self.require_resolved = require;
        self
    }

    pub fn load_str(&self, xml_content: &str) -> Result<LoadedDocument, LoadError> {
        let imported = self.importer.import(xml_content)?;
        let resolution = self.resolver.post_load(&imported.document);

        if self.require_resolved && !resolution.dangling.is_empty() {
            return Err(LoadError::Unresolved(resolution.dangling));
        }

        info!(
            "Loaded {} entities ({} import errors, {} dangling references)",
            imported.document.len(),
            imported.errors.len(),
            resolution.dangling.len()
        );
        Ok(LoadedDocument {
            document: imported.document,
            import_errors: imported.errors,
            resolution,
        })
    }

    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<LoadedDocument> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.load_str(&content)
            .with_context(|| format!("Failed to load SSRF document {}", path.display()))
    }
}
