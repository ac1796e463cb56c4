//! Error types for format adapters

use thiserror::Error;

/// Errors raised when a raw value does not satisfy its format.
///
/// Value-related variants carry the offending raw text and the constraint of
/// the adapter that rejected it, rendered the way the registry lists it
/// (e.g. `UN(3,2) [0, 359.99] deg`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Value lies outside the closed interval of the format
    #[error("value '{raw}' is out of range for {constraint}")]
    OutOfRange { raw: String, constraint: String },

    /// Integer or fractional part has more digits than the format allows
    #[error("value '{raw}' has too many digits for {constraint}")]
    TooManyDigits { raw: String, constraint: String },

    /// Value does not match the textual pattern of the format
    #[error("value '{raw}' does not match {constraint}")]
    PatternMismatch { raw: String, constraint: String },

    /// Value is not a member of the code list
    #[error("'{raw}' is not a legal code of {constraint}")]
    UnknownCode { raw: String, constraint: String },

    /// String is longer than the format allows
    #[error("value '{raw}' is longer than {constraint} allows ({actual} characters)")]
    TooLong {
        raw: String,
        constraint: String,
        actual: usize,
    },

    /// Empty text where a value is required
    #[error("empty value for {constraint}")]
    Empty { constraint: String },

    /// A field of one scalar type was bound to an adapter for another
    #[error("{constraint} produces {found} values, field expects {expected}")]
    KindMismatch {
        constraint: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Format code has no adapter in the registry
    #[error("no adapter registered for format code {0}")]
    UnknownFormat(String),

    /// Format code notation could not be parsed
    #[error("invalid format code notation '{0}'")]
    InvalidCode(String),
}

impl FormatError {
    /// Raw text carried by the error, if it concerns a value
    pub fn raw(&self) -> Option<&str> {
        match self {
            FormatError::OutOfRange { raw, .. }
            | FormatError::TooManyDigits { raw, .. }
            | FormatError::PatternMismatch { raw, .. }
            | FormatError::UnknownCode { raw, .. }
            | FormatError::TooLong { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Result type for format operations.
pub type FormatResult<T> = Result<T, FormatError>;
