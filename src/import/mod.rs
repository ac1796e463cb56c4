//! Import functionality
//!
//! Reads SSRF XML documents into the entity model. Every scalar goes through
//! the format adapter bound to its field; references are read as raw Serials
//! and left unresolved for the loader's resolution pass.

mod fields;
pub mod ssrf;

use crate::format::FormatError;
use crate::models::Document;

/// Result of an import operation
#[derive(Debug)]
pub struct ImportResult {
    /// Entities read from the document, references unresolved
    pub document: Document,
    /// Field-level errors that did not abort the import
    pub errors: Vec<ImportError>,
}

impl ImportResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Error during import
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Invalid value at {path}: {source}")]
    FormatError {
        path: String,
        #[source]
        source: FormatError,
    },
    #[error("Missing classification at {0}")]
    MissingClassification(String),
    #[error("Invalid {attribute} attribute at {path}: '{value}'")]
    InvalidAttribute {
        path: String,
        attribute: &'static str,
        value: String,
    },
    #[error("IO error: {0}")]
    IoError(String),
}

pub use ssrf::SsrfImporter;
