//! Classified scalar values
//!
//! Provides the container every leaf value of a document lives in:
//! - Security classification markings
//! - The `Classified<T>` wrapper and its provenance attributes
//! - The `Scalar` trait binding value types to format adapters

pub mod classification;
pub mod classified;

pub use classification::Classification;
pub use classified::{Classified, Scalar, ScalarMeta};
