//! Serial identifiers and reference resolution
//!
//! Entities point at each other by Serial on the wire and by shared handle in
//! memory. This module holds both representations and the passes converting
//! between them.

pub mod field;
pub mod resolver;
pub mod serial;

pub use field::{
    FieldMut, FieldRef, Linked, RefTarget, Reference, ReferenceField, Resolution, SerialLookup,
    TargetSerial, list_refs, list_refs_mut,
};
pub use resolver::{
    BuildReport, DanglingReference, EntitySource, ReferenceResolver, ResolutionReport,
    UnaddressableTarget,
};
pub use serial::Serial;
