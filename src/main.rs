use std::process::ExitCode;

use citerag::cli::print_command_error;
use citerag::cli::run_command;
use citerag::cli::Cli;
use citerag::config::AppConfig;
use citerag::Result;
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_command_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration before logging so the configured level applies
    let config = AppConfig::load()?;

    // Initialize logging
    if cli.verbose {
        citerag::logging::init_logging_with_level("debug")?;
    } else {
        citerag::logging::init_logging_with_config(Some(&config))?;
    }
    debug!("Configuration loaded successfully");

    // Execute the requested command
    run_command(cli.command, &config).await
}
