//! ASDTS configuration CLI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    load_env_file(cli.env_file.as_deref())?;

    match cli.command {
        Commands::ValidateConfig => cli::commands::validate::run(),
        Commands::ShowConfig => cli::commands::show::run(cli.json_logs),
    }
}

/// Seed the environment from a `.env` file. Variables already set win.
fn load_env_file(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load env file {}", path.display()))?;
        }
        None => {
            // A missing default .env is fine
            dotenvy::dotenv().ok();
        }
    }
    Ok(())
}
