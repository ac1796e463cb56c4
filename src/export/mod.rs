//! Export functionality
//!
//! Writes the entity model back to SSRF XML. Exporters only read the raw
//! Serial of each reference, so the build pass must run first (the
//! [`DocumentSaver`](crate::model::DocumentSaver) does this).

mod fields;
pub mod ssrf;

use crate::format::FormatError;

/// Result of an export operation
#[derive(Debug)]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Invalid value at {path}: {source}")]
    FormatError {
        path: String,
        #[source]
        source: FormatError,
    },
    #[error("Missing classification at {0}")]
    MissingClassification(String),
    #[error("IO error: {0}")]
    IoError(String),
}

pub use ssrf::SsrfExporter;
