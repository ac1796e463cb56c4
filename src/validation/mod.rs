//! Validation functionality
//!
//! Provides validation logic for:
//! - Referential integrity (dangling, stale and ambiguous references)
//! - Serial uniqueness within each entity kind
//! - Organisation hierarchy cycles

pub mod references;

pub use references::{
    AmbiguousReference, ReferenceAuditResult, ReferenceValidator, StaleReference, audit,
};
