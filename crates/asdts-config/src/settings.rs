//! Configuration structures.

use crate::env::{self, EnvSource};
use crate::error::ConfigResult;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

/// Main application settings. Built once at startup, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppSettings {
    pub storage: StorageSettings,
    pub trading: TradingSettings,
    pub sentiment: SentimentSettings,
    pub logging: LoggingSettings,
}

impl AppSettings {
    /// Populate every group from the source. No validation happens here.
    pub fn populate<S: EnvSource + ?Sized>(source: &S) -> ConfigResult<Self> {
        Ok(Self {
            storage: StorageSettings::from_env(source)?,
            trading: TradingSettings::from_env(source)?,
            sentiment: SentimentSettings::from_env(source)?,
            logging: LoggingSettings::from_env(source)?,
        })
    }

    /// Nested summary intended for log output.
    ///
    /// Deliberately partial: risk parameters, thresholds, the credential
    /// path and logging settings are left out.
    pub fn snapshot(&self) -> Value {
        json!({
            "firebase": {
                "project_id": self.storage.project_id,
                "collections": self.storage.collections,
            },
            "trading": {
                "exchange": self.trading.exchange,
                "testnet": self.trading.testnet,
                "default_symbol": self.trading.default_symbol,
            },
            "sentiment": {
                "sources": self.sentiment.sources,
                "update_interval": self.sentiment.update_interval_secs,
            },
        })
    }
}

/// Persistence backend settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageSettings {
    /// Path to the service-account credential file
    pub credential_path: String,
    /// Backend project identifier
    pub project_id: String,
    /// Logical dataset to physical collection names
    pub collections: Collections,
}

impl StorageSettings {
    pub fn from_env<S: EnvSource + ?Sized>(source: &S) -> ConfigResult<Self> {
        Ok(Self {
            credential_path: env::FIREBASE_CREDENTIAL_PATH.read(source)?,
            project_id: env::FIREBASE_PROJECT_ID.read(source)?,
            collections: Collections::default(),
        })
    }
}

/// Logical datasets persisted by the storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Trades,
    Sentiment,
    Strategies,
    SystemLogs,
    MarketData,
}

impl Dataset {
    pub const ALL: [Dataset; 5] = [
        Dataset::Trades,
        Dataset::Sentiment,
        Dataset::Strategies,
        Dataset::SystemLogs,
        Dataset::MarketData,
    ];

    /// Key used in the collection mapping.
    pub fn key(&self) -> &'static str {
        match self {
            Dataset::Trades => "trades",
            Dataset::Sentiment => "sentiment",
            Dataset::Strategies => "strategies",
            Dataset::SystemLogs => "system_logs",
            Dataset::MarketData => "market_data",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

/// Collection name for each dataset. One field per [`Dataset`], so every
/// key is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collections {
    pub trades: String,
    pub sentiment: String,
    pub strategies: String,
    pub system_logs: String,
    pub market_data: String,
}

impl Collections {
    pub fn get(&self, dataset: Dataset) -> &str {
        match dataset {
            Dataset::Trades => &self.trades,
            Dataset::Sentiment => &self.sentiment,
            Dataset::Strategies => &self.strategies,
            Dataset::SystemLogs => &self.system_logs,
            Dataset::MarketData => &self.market_data,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dataset, &str)> + '_ {
        Dataset::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            trades: "trades".to_string(),
            sentiment: "sentiment_data".to_string(),
            strategies: "trading_strategies".to_string(),
            system_logs: "system_logs".to_string(),
            market_data: "market_data".to_string(),
        }
    }
}

/// Trading parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradingSettings {
    /// Exchange identifier
    pub exchange: String,
    /// Route orders to the exchange testnet
    pub testnet: bool,
    /// Default trading pair
    pub default_symbol: String,
    /// Max position size, must be positive
    pub max_position_size: Decimal,
    /// Stop-loss as a fraction of entry, must be positive
    pub stop_loss_pct: Decimal,
    /// Take-profit as a fraction of entry
    pub take_profit_pct: Decimal,
    /// Aggregate sentiment score needed to act
    pub sentiment_threshold: f64,
}

impl TradingSettings {
    pub fn from_env<S: EnvSource + ?Sized>(source: &S) -> ConfigResult<Self> {
        Ok(Self {
            exchange: env::TRADING_EXCHANGE.read(source)?,
            testnet: env::TRADING_TESTNET.read(source)?,
            default_symbol: env::DEFAULT_SYMBOL.read(source)?,
            max_position_size: env::MAX_POSITION_SIZE.read(source)?,
            stop_loss_pct: env::STOP_LOSS_PCT.read(source)?,
            take_profit_pct: env::TAKE_PROFIT_PCT.read(source)?,
            sentiment_threshold: env::SENTIMENT_THRESHOLD.read(source)?,
        })
    }
}

/// Sentiment analysis parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSettings {
    pub sources: Vec<String>,
    pub update_interval_secs: i64,
    pub vader_threshold: f64,
}

impl SentimentSettings {
    pub const DEFAULT_SOURCES: [&'static str; 3] = ["news", "twitter", "reddit"];

    pub fn from_env<S: EnvSource + ?Sized>(source: &S) -> ConfigResult<Self> {
        Ok(Self {
            sources: Self::DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            update_interval_secs: env::SENTIMENT_UPDATE_INTERVAL.read(source)?,
            vader_threshold: env::VADER_THRESHOLD.read(source)?,
        })
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggingSettings {
    pub level: String,
    pub file_path: String,
    pub max_size_mb: i64,
    pub backup_count: i64,
}

impl LoggingSettings {
    pub fn from_env<S: EnvSource + ?Sized>(source: &S) -> ConfigResult<Self> {
        Ok(Self {
            level: env::LOG_LEVEL.read(source)?,
            file_path: env::LOG_FILE.read(source)?,
            max_size_mb: env::LOG_MAX_SIZE_MB.read(source)?,
            backup_count: env::LOG_BACKUP_COUNT.read(source)?,
        })
    }
}
