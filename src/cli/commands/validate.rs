//! Validate configuration command.

use anyhow::Result;
use asdts_config::{ConfigLoader, Dataset};

pub fn run() -> Result<()> {
    let loader = ConfigLoader::from_process_env();
    println!("Validating configuration from environment");

    let overridden = loader.overridden_vars();
    if overridden.is_empty() {
        println!("No variables set, using defaults");
    } else {
        println!("Overridden: {}", overridden.join(", "));
    }

    match loader.load() {
        Ok(report) => {
            let settings = &report.settings;
            for warning in &report.warnings {
                println!("Warning: {}", warning);
            }
            println!("Configuration is valid!");
            println!();
            println!("Project: {}", settings.storage.project_id);
            for dataset in Dataset::ALL {
                println!(
                    "  {:<12} -> {}",
                    dataset,
                    settings.storage.collections.get(dataset)
                );
            }
            println!(
                "Exchange: {} (testnet: {})",
                settings.trading.exchange, settings.trading.testnet
            );
            println!("Default symbol: {}", settings.trading.default_symbol);
            println!("Max position size: {}", settings.trading.max_position_size);
            println!("Stop loss: {}", settings.trading.stop_loss_pct);
            println!("Take profit: {}", settings.trading.take_profit_pct);
            println!("Sentiment sources: {}", settings.sentiment.sources.join(", "));
            println!("Sentiment interval: {}s", settings.sentiment.update_interval_secs);
            println!(
                "Log: {} -> {} ({} MB x {})",
                settings.logging.level,
                settings.logging.file_path,
                settings.logging.max_size_mb,
                settings.logging.backup_count
            );
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
