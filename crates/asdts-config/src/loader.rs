//! Two-phase settings build: populate from the environment, then validate.

use crate::env::{self, EnvSource, ProcessEnv};
use crate::error::{ConfigError, ConfigResult, ConfigWarning, Violation};
use crate::settings::AppSettings;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of a successful load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub settings: AppSettings,
    pub warnings: Vec<ConfigWarning>,
}

/// Builds [`AppSettings`] from an [`EnvSource`].
#[derive(Debug, Clone)]
pub struct ConfigLoader<S> {
    source: S,
}

impl ConfigLoader<ProcessEnv> {
    pub fn from_process_env() -> Self {
        Self::new(ProcessEnv)
    }
}

impl<S: EnvSource> ConfigLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Populate, validate and report advisory warnings.
    pub fn load(&self) -> ConfigResult<LoadReport> {
        let settings = AppSettings::populate(&self.source)?;
        let warnings = validate(&settings)?;

        for warning in &warnings {
            warn!("{}", warning);
        }
        debug!(
            "Configuration loaded ({} variables overridden)",
            env::overridden_vars(&self.source).len()
        );

        Ok(LoadReport { settings, warnings })
    }

    /// Recognized variables this loader's source overrides.
    pub fn overridden_vars(&self) -> Vec<&'static str> {
        env::overridden_vars(&self.source)
    }
}

impl AppSettings {
    /// Non-fatal findings about these settings.
    pub fn advisories(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let credential_path = Path::new(&self.storage.credential_path);
        if !credential_path.exists() {
            warnings.push(ConfigWarning::MissingCredentialFile {
                path: PathBuf::from(credential_path),
            });
        }
        warnings
    }
}

/// Check invariants. Returns advisory warnings on success, or every
/// violation found.
///
/// Only max position size and stop-loss are range-checked; take-profit and
/// the thresholds are accepted as given.
pub fn validate(settings: &AppSettings) -> ConfigResult<Vec<ConfigWarning>> {
    let mut violations = Vec::new();
    check_positive(
        env::MAX_POSITION_SIZE.name,
        settings.trading.max_position_size,
        &mut violations,
    );
    check_positive(
        env::STOP_LOSS_PCT.name,
        settings.trading.stop_loss_pct,
        &mut violations,
    );

    if !violations.is_empty() {
        return Err(ConfigError::Validation(violations));
    }

    Ok(settings.advisories())
}

fn check_positive(var: &'static str, value: Decimal, violations: &mut Vec<Violation>) {
    if value <= Decimal::ZERO {
        violations.push(Violation::NotPositive {
            var,
            value: value.to_string(),
        });
    }
}
