//! Validate command implementation

use std::io::Read;
use std::path::PathBuf;

use crate::cli::error::CliError;
use crate::cli::output::{ValidationReport, format_validation_output};
use crate::config::SsrfConfig;
use crate::model::DocumentLoader;
use crate::validation::ReferenceValidator;

/// Load input content from file or stdin
pub(crate) fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Handle the validate command: load, resolve, audit
pub fn handle_validate(input: &str, config: SsrfConfig, json: bool) -> Result<(), CliError> {
    let content = load_input(input)?;
    let loaded = DocumentLoader::with_config(config).load_str(&content)?;
    let audit = ReferenceValidator::new().audit(&loaded.document);

    let report = ValidationReport::new(&loaded, &audit);
    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to render report: {}", e)))?;
        println!("{}", rendered);
    } else {
        print!("{}", format_validation_output(&loaded, &audit));
    }

    if !report.passed() {
        return Err(CliError::ValidationError(format!(
            "{} import error(s), {} reference issue(s)",
            loaded.import_errors.len(),
            audit.issue_count()
        )));
    }
    Ok(())
}
