//! ClipStitch drone clip organizer
//!
//! Moves camera originals into `YYYY/MM/DD/HHMMSS.ext` folders and merges
//! clips recorded back to back into a single file with ffmpeg stream copy.
//!
//! # Usage
//!
//! ```bash
//! clipstitch run --root /footage
//! clipstitch plan --root /footage --gap 10 --json
//! clipstitch stitch --root /footage -v
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use clipstitch_cli::adapters::tracing_log::{init_subscriber, LogFormat};
use clipstitch_cli::cli::{commands, Cli, Commands};
use clipstitch_cli::config_initialization::initialize_configuration_hierarchy;

/// Main entry point for the ClipStitch CLI application
#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse command line arguments
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")?;

    // Initialize logging
    let format = LogFormat::parse(&cli.log_format)?;
    init_subscriber(&config.log_level, format)?;

    config.validate()?;
    info!("Starting ClipStitch");

    // Execute the requested command
    let had_failures = match &cli.command {
        Commands::Run(args) => commands::run(args, &config).await?,
        Commands::Organize(args) => commands::organize(args, &config).await?,
        Commands::Stitch(args) => commands::stitch(args, &config).await?,
        Commands::Plan(args) => commands::plan(args, &config).await?,
    };

    if had_failures {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
