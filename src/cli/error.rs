//! CLI error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Failed to read {0}: {1}")]
    FileReadError(PathBuf, String),
    #[error("Failed to write {0}: {1}")]
    FileWriteError(PathBuf, String),
    #[error("Invalid config file {0}: {1}")]
    ConfigError(PathBuf, String),
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error(transparent)]
    Load(#[from] crate::model::LoadError),
    #[error(transparent)]
    Export(#[from] crate::export::ExportError),
}
