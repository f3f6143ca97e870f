//! Typed environment variable table.
//!
//! Every recognized variable is declared once as an [`EnvVar`] constant
//! carrying its name, compiled-in default and target type. Absent, empty and
//! whitespace-only values fall back to the default; anything else must parse
//! or the load fails with [`ConfigError::Parse`].

use crate::error::{ConfigError, ConfigResult};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::str::FromStr;

/// Where raw variable values come from.
pub trait EnvSource {
    /// Raw value of `key`, if set.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    // Non-UTF-8 bytes become U+FFFD so the value fails to parse instead of
    // reading as unset.
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.to_string())
    }
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// A type that can be read from an environment variable.
pub trait FromEnv: Sized {
    /// Human-readable description used in parse errors.
    const EXPECTED: &'static str;

    fn parse_env(raw: &str) -> Option<Self>;
}

impl FromEnv for String {
    const EXPECTED: &'static str = "a string";

    fn parse_env(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FromEnv for bool {
    const EXPECTED: &'static str = "true or false";

    fn parse_env(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl FromEnv for Decimal {
    const EXPECTED: &'static str = "a decimal number";

    fn parse_env(raw: &str) -> Option<Self> {
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .ok()
    }
}

impl FromEnv for f64 {
    const EXPECTED: &'static str = "a floating-point number";

    fn parse_env(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl FromEnv for i64 {
    const EXPECTED: &'static str = "an integer";

    fn parse_env(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

/// One row of the variable table.
#[derive(Debug)]
pub struct EnvVar<T> {
    pub name: &'static str,
    pub default: &'static str,
    _target: PhantomData<fn() -> T>,
}

impl<T> EnvVar<T> {
    pub const fn new(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            default,
            _target: PhantomData,
        }
    }
}

impl<T: FromEnv> EnvVar<T> {
    /// Read and parse this variable, substituting the default when unset.
    pub fn read<S: EnvSource + ?Sized>(&self, source: &S) -> ConfigResult<T> {
        let raw = source
            .var(self.name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let text = raw.as_deref().unwrap_or(self.default);

        T::parse_env(text).ok_or_else(|| ConfigError::Parse {
            var: self.name,
            value: text.to_string(),
            expected: T::EXPECTED,
        })
    }

    /// Whether the source overrides the default.
    pub fn is_set<S: EnvSource + ?Sized>(&self, source: &S) -> bool {
        source
            .var(self.name)
            .is_some_and(|value| !value.trim().is_empty())
    }
}

// Storage
pub const FIREBASE_CREDENTIAL_PATH: EnvVar<String> =
    EnvVar::new("FIREBASE_CREDENTIAL_PATH", "firebase-credentials.json");
pub const FIREBASE_PROJECT_ID: EnvVar<String> = EnvVar::new("FIREBASE_PROJECT_ID", "asdts-system");

// Trading
pub const TRADING_EXCHANGE: EnvVar<String> = EnvVar::new("TRADING_EXCHANGE", "binance");
pub const TRADING_TESTNET: EnvVar<bool> = EnvVar::new("TRADING_TESTNET", "true");
pub const DEFAULT_SYMBOL: EnvVar<String> = EnvVar::new("DEFAULT_SYMBOL", "BTC/USDT");
pub const MAX_POSITION_SIZE: EnvVar<Decimal> = EnvVar::new("MAX_POSITION_SIZE", "0.1");
pub const STOP_LOSS_PCT: EnvVar<Decimal> = EnvVar::new("STOP_LOSS_PCT", "0.02");
pub const TAKE_PROFIT_PCT: EnvVar<Decimal> = EnvVar::new("TAKE_PROFIT_PCT", "0.03");
pub const SENTIMENT_THRESHOLD: EnvVar<f64> = EnvVar::new("SENTIMENT_THRESHOLD", "0.3");

// Sentiment
pub const SENTIMENT_UPDATE_INTERVAL: EnvVar<i64> = EnvVar::new("SENTIMENT_UPDATE_INTERVAL", "300");
pub const VADER_THRESHOLD: EnvVar<f64> = EnvVar::new("VADER_THRESHOLD", "0.05");

// Logging
pub const LOG_LEVEL: EnvVar<String> = EnvVar::new("LOG_LEVEL", "INFO");
pub const LOG_FILE: EnvVar<String> = EnvVar::new("LOG_FILE", "asdts.log");
pub const LOG_MAX_SIZE_MB: EnvVar<i64> = EnvVar::new("LOG_MAX_SIZE_MB", "10");
pub const LOG_BACKUP_COUNT: EnvVar<i64> = EnvVar::new("LOG_BACKUP_COUNT", "5");

/// Names of every recognized variable, in table order.
pub const RECOGNIZED_VARS: [&str; 15] = [
    FIREBASE_CREDENTIAL_PATH.name,
    FIREBASE_PROJECT_ID.name,
    TRADING_EXCHANGE.name,
    TRADING_TESTNET.name,
    DEFAULT_SYMBOL.name,
    MAX_POSITION_SIZE.name,
    STOP_LOSS_PCT.name,
    TAKE_PROFIT_PCT.name,
    SENTIMENT_THRESHOLD.name,
    SENTIMENT_UPDATE_INTERVAL.name,
    VADER_THRESHOLD.name,
    LOG_LEVEL.name,
    LOG_FILE.name,
    LOG_MAX_SIZE_MB.name,
    LOG_BACKUP_COUNT.name,
];

/// Recognized variables the source overrides.
pub fn overridden_vars<S: EnvSource + ?Sized>(source: &S) -> Vec<&'static str> {
    RECOGNIZED_VARS
        .iter()
        .copied()
        .filter(|name| source.var(name).is_some_and(|v| !v.trim().is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn env(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_unset_uses_default() {
        let source = env(&[]);
        assert_eq!(MAX_POSITION_SIZE.read(&source).unwrap(), dec!(0.1));
        assert_eq!(LOG_FILE.read(&source).unwrap(), "asdts.log");
        assert!(TRADING_TESTNET.read(&source).unwrap());
    }

    #[test]
    fn test_empty_and_blank_use_default() {
        let source = env(&[("LOG_MAX_SIZE_MB", ""), ("DEFAULT_SYMBOL", "   ")]);
        assert_eq!(LOG_MAX_SIZE_MB.read(&source).unwrap(), 10);
        assert_eq!(DEFAULT_SYMBOL.read(&source).unwrap(), "BTC/USDT");
        assert!(!LOG_MAX_SIZE_MB.is_set(&source));
    }

    #[test]
    fn test_values_are_trimmed() {
        let source = env(&[("SENTIMENT_UPDATE_INTERVAL", " 60 "), ("TRADING_EXCHANGE", " kraken\n")]);
        assert_eq!(SENTIMENT_UPDATE_INTERVAL.read(&source).unwrap(), 60);
        assert_eq!(TRADING_EXCHANGE.read(&source).unwrap(), "kraken");
    }

    #[test]
    fn test_bool_is_case_insensitive() {
        for (raw, expected) in [("TRUE", true), ("True", true), ("false", false), ("False", false)] {
            let source = env(&[("TRADING_TESTNET", raw)]);
            assert_eq!(TRADING_TESTNET.read(&source).unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn test_bool_rejects_other_words() {
        let source = env(&[("TRADING_TESTNET", "yes")]);
        let err = TRADING_TESTNET.read(&source).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Parse {
                var: "TRADING_TESTNET",
                value: "yes".to_string(),
                expected: "true or false",
            }
        );
    }

    #[test]
    fn test_decimal_accepts_scientific_notation() {
        let source = env(&[("STOP_LOSS_PCT", "1.5e-2")]);
        assert_eq!(STOP_LOSS_PCT.read(&source).unwrap(), dec!(0.015));
    }

    #[test]
    fn test_malformed_number_never_defaults() {
        let source = env(&[("MAX_POSITION_SIZE", "not-a-number")]);
        match MAX_POSITION_SIZE.read(&source) {
            Err(ConfigError::Parse { var, value, .. }) => {
                assert_eq!(var, "MAX_POSITION_SIZE");
                assert_eq!(value, "not-a-number");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_integers_are_accepted() {
        let source = env(&[("LOG_BACKUP_COUNT", "-1"), ("LOG_MAX_SIZE_MB", "-5")]);
        assert_eq!(LOG_BACKUP_COUNT.read(&source).unwrap(), -1);
        assert_eq!(LOG_MAX_SIZE_MB.read(&source).unwrap(), -5);
    }

    #[test]
    fn test_non_integer_is_parse_error() {
        let source = env(&[("SENTIMENT_UPDATE_INTERVAL", "2.5")]);
        assert!(matches!(
            SENTIMENT_UPDATE_INTERVAL.read(&source),
            Err(ConfigError::Parse { var: "SENTIMENT_UPDATE_INTERVAL", .. })
        ));
    }

    #[test]
    fn test_decimal_rejects_values_outside_its_range() {
        for raw in ["inf", "-inf", "nan", "1e100"] {
            let source = env(&[("TAKE_PROFIT_PCT", raw)]);
            assert!(
                matches!(
                    TAKE_PROFIT_PCT.read(&source),
                    Err(ConfigError::Parse { var: "TAKE_PROFIT_PCT", .. })
                ),
                "{raw}"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_process_env_non_utf8_value_is_parse_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        const NON_UTF8_SIZE: EnvVar<Decimal> = EnvVar::new("ASDTS_TEST_NON_UTF8_SIZE", "0.1");
        std::env::set_var(NON_UTF8_SIZE.name, OsStr::from_bytes(&[0x35, 0xff]));

        let result = NON_UTF8_SIZE.read(&ProcessEnv);
        std::env::remove_var(NON_UTF8_SIZE.name);

        match result {
            Err(ConfigError::Parse { var, value, .. }) => {
                assert_eq!(var, "ASDTS_TEST_NON_UTF8_SIZE");
                assert_eq!(value, "5\u{FFFD}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_overridden_vars() {
        let source = env(&[("LOG_LEVEL", "DEBUG"), ("LOG_FILE", ""), ("UNRELATED", "1")]);
        assert_eq!(overridden_vars(&source), vec!["LOG_LEVEL"]);
    }
}
