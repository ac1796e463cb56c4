//! Formats command implementation

use crate::cli::error::CliError;
use crate::cli::output::format_registry_output;
use crate::format::{FormatCode, FormatRegistry};

/// Handle the formats command: list registered codes, or check one value
pub fn handle_formats(check: Option<(&str, &str)>) -> Result<(), CliError> {
    let registry = FormatRegistry::global();
    let Some((code, value)) = check else {
        print!("{}", format_registry_output(registry));
        return Ok(());
    };

    let code: FormatCode = code
        .parse()
        .map_err(|e| CliError::InvalidArgument(format!("{}", e)))?;
    let format = registry
        .lookup(&code)
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    let canonical = format
        .canonicalize(value)
        .map_err(|e| CliError::ValidationError(e.to_string()))?;
    println!("{} {} -> {}", code, format, canonical);
    Ok(())
}
