mod cli;
mod commands;
mod error;
mod metadata;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    match run(&cli).await {
        Ok(code) => code,
        Err(error) => {
            tracing::debug!(code = error.code(), "command failed");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let envelope = commands::run(cli).await?;
    output::render(&envelope, cli.format, cli.pretty)?;

    if envelope.errors.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }

    let validation_only = envelope
        .errors
        .iter()
        .all(|error| error.code == "validation");
    Ok(ExitCode::from(if validation_only { 2 } else { 3 }))
}

/// Logs go to stderr so stdout stays machine-readable. `VALUORA_LOG` wins
/// over the verbosity flags.
fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env("VALUORA_LOG").unwrap_or_else(|_| EnvFilter::new(level));

    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("warning: failed to initialize logging: {error}");
    }
}
