//! Roundtrip command implementation

use std::path::PathBuf;

use crate::cli::commands::validate::load_input;
use crate::cli::error::CliError;
use crate::config::SsrfConfig;
use crate::model::{DocumentLoader, DocumentSaver};

/// Handle the roundtrip command: load and resolve, then build and save
pub fn handle_roundtrip(input: &str, output: &str, config: SsrfConfig) -> Result<(), CliError> {
    let content = load_input(input)?;
    let loaded = DocumentLoader::with_config(config.clone()).load_str(&content)?;
    for error in &loaded.import_errors {
        eprintln!("⚠️  {}", error);
    }

    let saved = DocumentSaver::with_config(config).save_string(&loaded.document)?;
    if output == "-" {
        print!("{}", saved.content);
    } else {
        let path = PathBuf::from(output);
        std::fs::write(&path, &saved.content)
            .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?;
        eprintln!(
            "✅ Wrote {} entities to {} ({} references rebuilt, {} dangling kept)",
            loaded.document.len(),
            path.display(),
            saved.build.rebuilt,
            loaded.resolution.dangling.len()
        );
    }
    Ok(())
}
