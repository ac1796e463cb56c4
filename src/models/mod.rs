//! Entity catalog and document container
//!
//! A representative slice of the SSRF entity catalog. Entities are plain data
//! holders: every leaf is a [`Classified`](crate::scalar::Classified) scalar
//! bound to a format code, and every link to another entity is a
//! [`Reference`](crate::reference::Reference) field declared through
//! [`Linked`](crate::reference::Linked).

pub mod assignment;
pub mod common;
pub mod contact;
pub mod document;
pub mod entity;
pub mod location;
pub mod note;
pub mod poc;

pub use assignment::{Assignment, Receiver, Transmitter};
pub use common::Common;
pub use contact::{Contact, Organisation, Role};
pub use document::{Document, DocumentIndex, DuplicateSerial};
pub use entity::{Addressable, Entity, EntityHandle, EntityKind, Shared, shared};
pub use location::Location;
pub use note::Note;
pub use poc::PocTarget;
