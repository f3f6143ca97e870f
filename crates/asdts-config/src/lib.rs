//! Environment-driven configuration management.
//!
//! Settings are grouped by concern (storage, trading, sentiment, logging),
//! read from environment variables with compiled-in defaults, validated
//! once, and then shared read-only for the life of the process.

pub mod env;
mod error;
mod global;
mod loader;
mod settings;

pub use env::{EnvSource, ProcessEnv};
pub use error::{ConfigError, ConfigResult, ConfigWarning, Violation};
pub use global::{get, initialize, initialize_from};
pub use loader::{validate, ConfigLoader, LoadReport};
pub use settings::{
    AppSettings, Collections, Dataset, LoggingSettings, SentimentSettings, StorageSettings,
    TradingSettings,
};
