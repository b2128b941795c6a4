//! CLI module for ClipStitch
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config_initialization::CliOverrides;

pub mod args;
pub mod commands;

pub use args::{GroupingArgs, OrganizeArgs, PlanArgs, RootArgs, RunArgs, StitchArgs};

/// ClipStitch drone clip organizer
///
/// Sorts camera originals into YYYY/MM/DD folders and losslessly merges clips
/// that were recorded back to back.
#[derive(Parser, Debug)]
#[command(name = "clipstitch")]
#[command(about = "ClipStitch - Organize drone clips by date and stitch contiguous recordings")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (TOML, [clipstitch] table)
    #[arg(long, global = true, env = "CLIPSTITCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error) [default: info]
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (text, json)
    #[arg(long, default_value = "text", global = true)]
    pub log_format: String,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Organize camera originals, then stitch every date folder
    Run(RunArgs),
    /// Move camera originals into YYYY/MM/DD/HHMMSS.ext
    Organize(OrganizeArgs),
    /// Stitch contiguous clips in every date folder
    Stitch(StitchArgs),
    /// Show how clips would be grouped without touching any file
    Plan(PlanArgs),
}

impl Cli {
    /// Command-line layer of the configuration hierarchy
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = match &self.command {
            Commands::Run(args) => args.overrides(),
            Commands::Organize(args) => args.overrides(),
            Commands::Stitch(args) => args.overrides(),
            Commands::Plan(args) => args.overrides(),
        };
        overrides.log_level = self.log_level.clone();
        overrides
    }
}
