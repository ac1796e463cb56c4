//! Markup tree used by the SSRF importer and exporter

pub mod node;
pub mod tags;

pub use node::{XmlError, XmlNode};
