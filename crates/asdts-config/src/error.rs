//! Error types for configuration loading.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration error. Either the full settings object is built or
/// one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} (expected {expected})")]
    Parse {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid configuration: {}", join_violations(.0))]
    Validation(Vec<Violation>),
}

/// A single broken invariant found by the validation pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("{var} must be positive, got {value}")]
    NotPositive { var: &'static str, value: String },
}

impl Violation {
    /// Environment variable that carries the offending value.
    pub fn var(&self) -> &'static str {
        match self {
            Violation::NotPositive { var, .. } => var,
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Advisory diagnostic. Reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    MissingCredentialFile { path: PathBuf },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::MissingCredentialFile { path } => {
                write!(f, "Firebase credential file not found: {}", path.display())
            }
        }
    }
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_variable_and_value() {
        let err = ConfigError::Parse {
            var: "MAX_POSITION_SIZE",
            value: "abc".to_string(),
            expected: "a decimal number",
        };
        let msg = err.to_string();
        assert!(msg.contains("MAX_POSITION_SIZE"));
        assert!(msg.contains("\"abc\""));
    }

    #[test]
    fn test_validation_error_lists_every_violation() {
        let err = ConfigError::Validation(vec![
            Violation::NotPositive {
                var: "MAX_POSITION_SIZE",
                value: "0".to_string(),
            },
            Violation::NotPositive {
                var: "STOP_LOSS_PCT",
                value: "-0.01".to_string(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid configuration: MAX_POSITION_SIZE must be positive, got 0; \
             STOP_LOSS_PCT must be positive, got -0.01"
        );
    }
}
