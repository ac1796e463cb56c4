//! CLI command handlers

pub mod formats;
pub mod roundtrip;
pub mod validate;

pub use formats::handle_formats;
pub use roundtrip::handle_roundtrip;
pub use validate::handle_validate;
