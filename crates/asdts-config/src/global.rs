//! Process-wide settings access.
//!
//! Settings are built at most once per process and shared read-only
//! afterwards. Nothing reloads or tears them down.

use crate::env::{EnvSource, ProcessEnv};
use crate::error::ConfigResult;
use crate::loader::ConfigLoader;
use crate::settings::AppSettings;
use std::sync::OnceLock;

static SETTINGS: OnceLock<AppSettings> = OnceLock::new();

/// Build the settings from the process environment, once.
///
/// Later calls return the stored instance without reading the environment
/// again. On failure nothing is stored and the next call retries.
pub fn initialize() -> ConfigResult<&'static AppSettings> {
    initialize_from(ProcessEnv)
}

/// Like [`initialize`], reading from an explicit source.
pub fn initialize_from<S: EnvSource>(source: S) -> ConfigResult<&'static AppSettings> {
    if let Some(settings) = SETTINGS.get() {
        return Ok(settings);
    }

    let report = ConfigLoader::new(source).load()?;
    Ok(SETTINGS.get_or_init(|| report.settings))
}

/// The shared settings, if [`initialize`] has succeeded.
pub fn get() -> Option<&'static AppSettings> {
    SETTINGS.get()
}
