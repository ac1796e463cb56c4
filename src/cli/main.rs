//! ssrf-cli: validate and round-trip SSRF documents

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use ssrf_model::SsrfConfig;
use ssrf_model::cli::CliError;
use ssrf_model::cli::commands::{handle_formats, handle_roundtrip, handle_validate};

#[derive(Parser)]
#[command(name = "ssrf-cli")]
#[command(about = "Validate and round-trip SSRF spectrum documents")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Abort on the first field error
    #[arg(long, global = true)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a document, resolve references and audit referential integrity
    Validate {
        /// Input file, or - for stdin
        input: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load, resolve, rebuild and save a document
    Roundtrip {
        /// Input file, or - for stdin
        input: String,
        /// Output file, or - for stdout
        output: String,
    },
    /// List registered format codes, or check a value against one
    Formats {
        /// Format code, e.g. FREQ or SN(3,2)
        #[arg(requires = "value")]
        code: Option<String>,
        /// Value to check
        value: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<SsrfConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| CliError::FileReadError(path.clone(), e.to_string()))?;
            SsrfConfig::from_toml_str(&content)
                .map_err(|e| CliError::ConfigError(path.clone(), e.to_string()))?
        }
        None => SsrfConfig::default(),
    };
    if cli.strict {
        config.strict = true;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    match &cli.command {
        Command::Validate { input, json } => handle_validate(input, config, *json),
        Command::Roundtrip { input, output } => handle_roundtrip(input, output, config),
        Command::Formats { code, value } => match (code, value) {
            (Some(code), Some(value)) => handle_formats(Some((code.as_str(), value.as_str()))),
            _ => handle_formats(None),
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
