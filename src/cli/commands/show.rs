//! Show configuration command.

use anyhow::{Context, Result};
use asdts_monitor::setup_logging;
use tracing::{info, warn};

pub fn run(json_logs: bool) -> Result<()> {
    let settings = asdts_config::initialize().context("Failed to load configuration")?;

    let _guard = setup_logging(&settings.logging, json_logs)
        .with_context(|| format!("Failed to open log file {}", settings.logging.file_path))?;

    // Warnings raised during initialize() predate the subscriber.
    for warning in settings.advisories() {
        warn!("{}", warning);
    }

    let snapshot = settings.snapshot();
    info!("Configuration loaded: {}", snapshot);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
