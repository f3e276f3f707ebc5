//! Configuration management for attendance.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use chrono::FixedOffset;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the user's config directory.
const CONFIG_DIR_NAME: &str = "attendance";

/// Default attendance file name.
const STORE_FILE_NAME: &str = "attendance_records.csv";

/// Default log file name.
const LOG_FILE_NAME: &str = "attendance_system.log";

/// Offsets must stay strictly inside one day.
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ATTENDANCE_`, nested keys split on `__`)
/// 2. TOML config file at `~/.config/attendance/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Attendance file configuration.
    pub store: StoreConfig,
    /// Timestamp clock configuration.
    pub clock: ClockConfig,
    /// Log sink configuration.
    pub log: LogConfig,
}

/// Attendance file configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the attendance file, relative to the working directory
    /// unless absolute.
    pub path: PathBuf,
}

/// Timestamp clock configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Fixed offset from UTC in minutes. Local time when unset.
    pub utc_offset_minutes: Option<i32>,
}

/// Log sink configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Write log lines to a file.
    pub enabled: bool,
    /// Directory holding the log file.
    pub directory: PathBuf,
    /// Log file name (prefix when rotating).
    pub file_name: String,
    /// How often to start a new log file.
    pub rotation: LogRotation,
}

/// Log file rotation period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// A single file that grows forever.
    #[default]
    Never,
    /// A new file every day.
    Daily,
    /// A new file every hour.
    Hourly,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(STORE_FILE_NAME),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from("."),
            file_name: LOG_FILE_NAME.to_string(),
            rotation: LogRotation::Never,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// A missing config file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("ATTENDANCE_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.store.path.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                message: "store.path must not be empty".to_string(),
            });
        }

        if self.log.enabled && self.log.file_name.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "log.file_name must not be empty".to_string(),
            });
        }

        if let Some(minutes) = self.clock.utc_offset_minutes {
            if minutes.abs() > MAX_OFFSET_MINUTES {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "clock.utc_offset_minutes ({minutes}) must be within +/-{MAX_OFFSET_MINUTES}"
                    ),
                });
            }
        }

        Ok(())
    }

    /// Get the attendance file path.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.store.path.clone()
    }

    /// Get the configured UTC offset, `None` for local time.
    #[must_use]
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.clock
            .utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
    }
}
