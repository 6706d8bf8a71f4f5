//! Configuration management for FluidTel
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, by default stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Status query settings (attempt cap, per-attempt timeout)
//! - Reporting settings (units attached to parsed positions)
//! - Logging preferences

use fluidtel_communication::RetryPolicy;
use fluidtel_core::{Error, Result, Units};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Status query settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Maximum number of status query attempts
    pub max_attempts: u32,
    /// Time allowed for each attempt in milliseconds
    pub attempt_timeout_ms: u64,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            attempt_timeout_ms: 4000,
        }
    }
}

impl QuerySettings {
    /// Retry policy for the status query protocol
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.attempt_timeout_ms),
        )
    }
}

/// Reporting settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingSettings {
    /// Units the controller reports positions in (`mm` or `inch`)
    pub units: String,
}

impl Default for ReportingSettings {
    fn default() -> Self {
        Self {
            units: Units::MM.to_string(),
        }
    }
}

impl ReportingSettings {
    /// Parsed reporting units
    pub fn units(&self) -> Result<Units> {
        match self.units.parse::<Units>() {
            Ok(Units::Unknown) | Err(_) => Err(Error::other(format!(
                "Unknown reporting units '{}'",
                self.units
            ))),
            Ok(units) => Ok(units),
        }
    }
}

/// Logging preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default log filter, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON log lines
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Status query settings
    pub query: QuerySettings,
    /// Reporting settings
    pub reporting: ReportingSettings,
    /// Logging preferences
    pub logging: LoggingSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config dir>/fluidtel/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fluidtel").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::other(format!("Failed to read config file: {}", e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid JSON config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid TOML config: {}", e)))?
        } else {
            return Err(Error::other(
                "Config file must be .json or .toml".to_string(),
            ));
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else {
            return Err(Error::other(
                "Config file must be .json or .toml".to_string(),
            ));
        };

        std::fs::write(path, content)
            .map_err(|e| Error::other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.query.max_attempts == 0 {
            return Err(Error::other("Query attempts must be > 0".to_string()));
        }

        if self.query.attempt_timeout_ms == 0 {
            return Err(Error::other("Query attempt timeout must be > 0".to_string()));
        }

        self.reporting.units()?;

        if self.logging.level.trim().is_empty() {
            return Err(Error::other("Log level must not be empty".to_string()));
        }

        Ok(())
    }
}
