//! Logging setup.

use asdts_config::LoggingSettings;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::rotation::RotatingFileWriter;

/// Map a level name such as `INFO` or `WARNING` to a tracing filter
/// directive. Unknown names fall back to `info`.
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" => "trace",
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" | "WARNING" => "warn",
        "ERROR" | "CRITICAL" | "FATAL" => "error",
        _ => "info",
    }
}

/// Setup logging to stdout and the rotating log file from `settings`.
///
/// `RUST_LOG` overrides the configured level. The returned guard flushes the
/// file writer on drop and must be held for as long as logging is needed.
pub fn setup_logging(settings: &LoggingSettings, json: bool) -> io::Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(&settings.level)));

    let writer = RotatingFileWriter::open(
        &settings.file_path,
        settings.max_size_mb,
        settings.backup_count,
    )?;
    let (file_writer, guard) = tracing_appender::non_blocking(writer);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .with(fmt::layer().with_ansi(false).with_writer(file_writer))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .with(fmt::layer().with_ansi(false).with_writer(file_writer))
            .init();
    }

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_directive_maps_standard_names() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("INFO"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("warn"), "warn");
        assert_eq!(level_directive("Error"), "error");
        assert_eq!(level_directive("CRITICAL"), "error");
        assert_eq!(level_directive(" trace "), "trace");
    }

    #[test]
    fn test_level_directive_unknown_falls_back_to_info() {
        assert_eq!(level_directive("verbose"), "info");
        assert_eq!(level_directive(""), "info");
    }

    // Installs the global subscriber, so it is the only test here that may.
    #[test]
    fn test_setup_logging_writes_to_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("asdts.log");
        let settings = LoggingSettings {
            level: "INFO".to_string(),
            file_path: path.to_string_lossy().into_owned(),
            max_size_mb: 10,
            backup_count: 5,
        };

        let guard = setup_logging(&settings, false).unwrap();
        tracing::error!("settings loaded for file sink check");
        drop(guard);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("settings loaded for file sink check"));
        assert!(!contents.contains('\x1b'));
    }
}
