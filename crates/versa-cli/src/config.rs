//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Command-line arguments

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use versa_core::{ComparatorConfig, ParseMode};

/// File name stem searched for in the current and home directories
const CONFIG_STEM: &str = ".versa";

/// Supported configuration file extensions, in lookup order
const CONFIG_EXTENSIONS: [&str; 4] = ["yaml", "yml", "json", "toml"];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version parsing settings
    pub parsing: ParsingConfig,

    /// Generic comparator settings
    pub comparator: ComparatorConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Version parsing configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// How major and minor segments are read
    pub mode: ParseMode,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,

    /// Log file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            file: None,
        }
    }
}

/// One configuration file as written: only the settings it names are `Some`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub parsing: ParsingLayer,
    pub comparator: ComparatorLayer,
    pub output: OutputLayer,
    pub logging: LoggingLayer,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParsingLayer {
    pub mode: Option<ParseMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComparatorLayer {
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputLayer {
    pub format: Option<OutputFormat>,
    pub color: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingLayer {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<PathBuf>,
}

impl ConfigLayer {
    /// Read a single layer from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let layer = match FileFormat::from_path(path)? {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(layer)
    }
}

/// Serialization format of a configuration file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "YAML, JSON or TOML".to_string(),
            }),
        }
    }
}

impl Config {
    /// Load configuration from a file, with defaults for everything it omits
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge(ConfigLayer::from_file(path)?);
        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Every file found is layered over the defaults, lowest precedence
    /// first: home directory, user config directory, current directory.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();
        let mut found = false;

        for path in Self::default_config_paths().iter().rev() {
            if !path.exists() {
                continue;
            }
            match ConfigLayer::from_file(path) {
                Ok(layer) => {
                    config.merge(layer);
                    found = true;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to load config");
                }
            }
        }

        if !found {
            tracing::debug!("No configuration file found, using defaults");
        }
        Ok(config)
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Path of the per-user configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("versa").join("config.toml"))
    }

    /// Path of the project configuration file in the current directory
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(format!("{}.toml", CONFIG_STEM))
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Current directory
        for ext in CONFIG_EXTENSIONS {
            paths.push(PathBuf::from(format!("{}.{}", CONFIG_STEM, ext)));
        }

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let versa_dir = config_dir.join("versa");
            for ext in CONFIG_EXTENSIONS {
                paths.push(versa_dir.join(format!("config.{}", ext)));
            }
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            for ext in CONFIG_EXTENSIONS {
                paths.push(home_dir.join(format!("{}.{}", CONFIG_STEM, ext)));
            }
        }

        paths
    }

    /// Apply a layer on top of this configuration
    ///
    /// Every setting the layer names wins, including one that restates a
    /// default; settings it omits are left alone.
    pub fn merge(&mut self, layer: ConfigLayer) {
        if let Some(mode) = layer.parsing.mode {
            self.parsing.mode = mode;
        }
        if let Some(max_depth) = layer.comparator.max_depth {
            self.comparator.max_depth = max_depth;
        }
        if let Some(format) = layer.output.format {
            self.output.format = format;
        }
        if let Some(color) = layer.output.color {
            self.output.color = color;
        }
        if let Some(level) = layer.logging.level {
            self.logging.level = level;
        }
        if let Some(format) = layer.logging.format {
            self.logging.format = format;
        }
        if let Some(file) = layer.logging.file {
            self.logging.file = Some(file);
        }
    }

    /// Serialize the configuration in the format implied by the path
    fn to_string_for(&self, path: &Path) -> Result<String> {
        let content = match FileFormat::from_path(path)? {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| Error::config(format!("Failed to serialize as TOML: {}", e)))?,
        };
        Ok(content)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_string_for(path)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        tracing::info!(path = %path.display(), "Saved configuration");
        Ok(())
    }
}

/// Builder for creating configurations programmatically
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new config builder
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the version parse mode
    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.config.parsing.mode = mode;
        self
    }

    /// Set the comparator nesting limit
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.comparator.max_depth = max_depth;
        self
    }

    /// Set the default output format
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the log level
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
