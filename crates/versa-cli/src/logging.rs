//! Logging utilities for the Versa CLI
//!
//! This module provides:
//! - Structured logging setup (compact, full, JSON)
//! - Optional file output
//! - Environment overrides
//! - Performance timing spans

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{field, Span};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter
    pub level: String,
    /// Output format: compact, full, json
    pub format: LogFormat,
    /// Enable console output
    pub console: bool,
    /// Optional file output path
    pub file: Option<PathBuf>,
    /// Include thread IDs
    pub thread_ids: bool,
    /// Include file and line numbers
    pub source_location: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact format for everyday use
    Compact,
    /// Full format with all details
    Full,
    /// JSON structured format
    Json,
}

impl LogFormat {
    /// Parse a format name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "full" => Some(Self::Full),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            console: true,
            file: None,
            thread_ids: false,
            source_location: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging config from verbosity level
    pub fn from_verbosity(verbosity: u8) -> Self {
        let mut config = Self::default();

        match verbosity {
            0 => {
                config.level = "warn".to_string();
            }
            1 => {
                config.level = "info".to_string();
            }
            2 => {
                config.level = "debug".to_string();
                config.source_location = true;
            }
            _ => {
                config.level = "trace".to_string();
                config.format = LogFormat::Full;
                config.source_location = true;
                config.thread_ids = true;
            }
        }

        config
    }

    /// Apply settings from the configuration file
    ///
    /// The file's level only applies when no `-v` flag raised verbosity.
    pub fn merge_with_settings(&mut self, settings: &crate::config::LoggingConfig, verbosity: u8) {
        if verbosity == 0 {
            self.level = settings.level.clone();
        }

        match LogFormat::from_name(&settings.format) {
            Some(format) if verbosity < 3 => self.format = format,
            Some(_) => {}
            None => tracing::warn!("Invalid log format in config: {}", settings.format),
        }

        if settings.file.is_some() {
            self.file = settings.file.clone();
        }
    }

    /// Apply environment overrides
    pub fn merge_with_env(&mut self) {
        self.apply_env(|name| std::env::var(name).ok());
    }

    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // RUST_LOG takes precedence
        if let Some(rust_log) = lookup("RUST_LOG") {
            self.level = rust_log;
        }

        if let Some(format) = lookup("VERSA_LOG_FORMAT") {
            match LogFormat::from_name(&format) {
                Some(format) => self.format = format,
                None => tracing::warn!("Invalid log format: {}, using default", format),
            }
        }

        if let Some(file) = lookup("VERSA_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }

        if let Some(console) = lookup("VERSA_LOG_CONSOLE") {
            self.console = console.to_lowercase() == "true" || console == "1";
        }
    }
}

/// Initialize the global logging system
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::other(format!("Invalid log filter '{}': {}", config.level, e)))?;

    match &config.file {
        Some(path) => {
            let appender = file_appender(path)?;
            install(&config, env_filter, appender, false)?;
        }
        None if config.console => {
            let ansi = config.format != LogFormat::Json && std::io::stderr().is_terminal();
            install(&config, env_filter, std::io::stderr, ansi)?;
        }
        None => {
            install(&config, env_filter, std::io::sink, false)?;
        }
    }

    tracing::debug!(config = ?config, "Logging system initialized");
    Ok(())
}

/// Build a non-rotating file appender for the given path
fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::config(format!("Invalid log file path: {}", path.display())))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .map_err(|e| Error::config(format!("Unable to open log file {}: {}", path.display(), e)))
}

/// Install a subscriber in the configured format writing to `writer`
fn install<W>(config: &LoggingConfig, env_filter: EnvFilter, writer: W, ansi: bool) -> Result<()>
where
    W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(config.thread_ids)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    // Each format produces a distinct subscriber type
    let installed = match config.format {
        LogFormat::Compact => {
            tracing::subscriber::set_global_default(builder.with_ansi(ansi).compact().finish())
        }
        LogFormat::Full => tracing::subscriber::set_global_default(builder.with_ansi(ansi).finish()),
        LogFormat::Json => {
            tracing::subscriber::set_global_default(builder.with_ansi(false).json().finish())
        }
    };

    installed.map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))
}

/// Create a span for a timed operation
pub fn create_operation_span(operation: &str, details: Option<&str>) -> Span {
    tracing::info_span!(
        "operation",
        operation = operation,
        details = details.unwrap_or(""),
        duration_ms = field::Empty,
    )
}

/// Performance timing utilities
pub mod timing {
    use std::time::{Duration, Instant};
    use tracing::Span;

    /// A timer that logs its duration when dropped
    pub struct Timer {
        start: Instant,
        span: Span,
        operation: String,
    }

    impl Timer {
        pub fn new(operation: &str) -> Self {
            Self::build(operation, None)
        }

        pub fn with_details(operation: &str, details: &str) -> Self {
            Self::build(operation, Some(details))
        }

        fn build(operation: &str, details: Option<&str>) -> Self {
            Self {
                start: Instant::now(),
                span: super::create_operation_span(operation, details),
                operation: operation.to_string(),
            }
        }

        /// Get elapsed time without finishing the timer
        pub fn elapsed(&self) -> Duration {
            self.start.elapsed()
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            let duration = self.start.elapsed();
            self.span.record("duration_ms", duration.as_millis() as u64);

            tracing::debug!(
                operation = %self.operation,
                duration_ms = duration.as_millis() as u64,
                "Operation completed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_logging_config_from_verbosity() {
        let config = LoggingConfig::from_verbosity(0);
        assert_eq!(config.level, "warn");
        assert!(!config.source_location);

        let config = LoggingConfig::from_verbosity(2);
        assert_eq!(config.level, "debug");
        assert!(config.source_location);

        let config = LoggingConfig::from_verbosity(3);
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, LogFormat::Full);
        assert!(config.thread_ids);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("RUST_LOG", "versa_core=trace"),
            ("VERSA_LOG_FORMAT", "JSON"),
            ("VERSA_LOG_FILE", "/tmp/versa.log"),
            ("VERSA_LOG_CONSOLE", "0"),
        ]
        .into_iter()
        .collect();

        let mut config = LoggingConfig::default();
        config.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.level, "versa_core=trace");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file, Some(PathBuf::from("/tmp/versa.log")));
        assert!(!config.console);
    }

    #[test]
    fn test_invalid_env_format_is_ignored() {
        let mut config = LoggingConfig::default();
        config.apply_env(|name| (name == "VERSA_LOG_FORMAT").then(|| "xml".to_string()));
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn test_merge_with_settings() {
        let settings = crate::config::LoggingConfig {
            level: "error".to_string(),
            format: "json".to_string(),
            file: Some(PathBuf::from("out.log")),
        };

        let mut quiet = LoggingConfig::from_verbosity(0);
        quiet.merge_with_settings(&settings, 0);
        assert_eq!(quiet.level, "error");
        assert_eq!(quiet.format, LogFormat::Json);
        assert_eq!(quiet.file, Some(PathBuf::from("out.log")));

        let mut verbose = LoggingConfig::from_verbosity(2);
        verbose.merge_with_settings(&settings, 2);
        assert_eq!(verbose.level, "debug");
    }

    #[test]
    fn test_file_appender_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(file_appender(&dir.path().join("versa.log")).is_ok());
        assert!(dir.path().join("versa.log").exists());
        assert!(file_appender(Path::new("/")).is_err());
    }

    #[test]
    fn test_timer_elapsed() {
        let timer = timing::Timer::with_details("sort", "3 versions");
        assert!(timer.elapsed() < std::time::Duration::from_secs(60));
    }
}
