//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "asdts")]
#[command(author, version, about = "ASDTS configuration bootstrap")]
pub struct Cli {
    /// Env file to load before reading settings (defaults to ./.env if present)
    #[arg(long, env = "ASDTS_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate configuration
    ValidateConfig,
    /// Initialize settings and logging, then print the settings snapshot
    ShowConfig,
}
