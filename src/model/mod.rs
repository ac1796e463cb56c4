//! Document loading and saving
//!
//! Wraps import and export with the two reference passes:
//! load = parse + resolve, save = build + serialize.

pub mod loader;
pub mod saver;

pub use loader::{DocumentLoader, LoadError, LoadedDocument};
pub use saver::{DocumentSaver, SavedDocument};
