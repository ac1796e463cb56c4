//! SSRF Model - typed in-memory model for SSRF spectrum documents
//!
//! Provides unified interfaces for:
//! - Classified scalars and the format adapters that validate them
//! - Serial identifiers and two-phase reference resolution
//! - A sample of the SSRF entity catalog and its document container
//! - SSRF XML import/export and document loading/saving
//! - Referential integrity validation

pub mod config;
pub mod export;
pub mod format;
pub mod import;
pub mod model;
pub mod models;
pub mod reference;
pub mod scalar;
pub mod validation;
pub mod xml;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use config::{SsrfConfig, SsrfConfigBuilder};
pub use export::{ExportError, ExportResult, SsrfExporter};
pub use format::{Format, FormatCode, FormatError, FormatRegistry};
pub use import::{ImportError, ImportResult, SsrfImporter};
pub use model::{DocumentLoader, DocumentSaver, LoadError, LoadedDocument, SavedDocument};
pub use reference::{
    BuildReport, DanglingReference, Reference, ReferenceResolver, ResolutionReport, Serial,
};
pub use scalar::{Classification, Classified};
pub use validation::{ReferenceAuditResult, ReferenceValidator};

// Re-export models
pub use models::{
    Assignment, Contact, Document, EntityHandle, EntityKind, Location, Note, Organisation,
    PocTarget, Receiver, Role, Shared, Transmitter,
};
