//! CLI module for the ssrf-cli binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
