//! Configuration loading for the island builder.
//!
//! Configuration lives in `island-config.yaml` in the working directory.
//! Every section is optional; missing values take the stock defaults, so
//! an empty file (or no file) builds the stock island.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::WorldError;
use crate::geometry::IslandGeometry;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "island-config.yaml";

/// Environment variable overriding `output.report_path`.
pub const REPORT_PATH_ENV: &str = "ISLAND_REPORT_PATH";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configured geometry is not usable.
    #[error("invalid geometry in config: {source}")]
    Geometry {
        /// The validation failure.
        source: WorldError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level island builder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IslandConfig {
    /// World envelope, island band and spawn.
    #[serde(default)]
    pub geometry: IslandGeometry,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where and how the creation report is written.
    #[serde(default)]
    pub output: OutputConfig,
}

impl IslandConfig {
    /// Load configuration from a YAML file.
    ///
    /// `ISLAND_REPORT_PATH` overrides `output.report_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Geometry`] if the geometry fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Geometry`] if the geometry fails validation.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config
            .geometry
            .validate()
            .map_err(|source| ConfigError::Geometry { source })?;
        config.output.apply_env_overrides();
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults (with
    /// environment overrides still applied).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an existing file cannot be loaded.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            let mut config = Self::default();
            config.output.apply_env_overrides();
            Ok(config)
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// File to write the JSON report to; stdout when absent.
    #[serde(default)]
    pub report_path: Option<PathBuf>,

    /// Pretty-print the JSON report.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl OutputConfig {
    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Some(val) = std::env::var(REPORT_PATH_ENV).ok().filter(|v| !v.is_empty()) {
            self.report_path = Some(PathBuf::from(val));
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: None,
            pretty: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}
