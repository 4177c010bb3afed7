//! Controller configuration, loadable from TOML.
//!
//! ```toml
//! max_level = 5
//! tick_interval_ms = 1000
//! arrival_dwell_ms = 1000
//! error_dwell_ms = 1000
//! history_limit = 64
//! ```
//!
//! Every key is optional; missing keys take the defaults above.

use crate::core::Level;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MAX_LEVEL: Level = 5;
pub const DEFAULT_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    /// Highest floor; floors are `1..=max_level`.
    pub max_level: Level,
    pub tick_interval_ms: u64,
    pub arrival_dwell_ms: u64,
    pub error_dwell_ms: u64,
    /// Number of committed transitions kept in the history.
    pub history_limit: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            tick_interval_ms: DEFAULT_INTERVAL_MS,
            arrival_dwell_ms: DEFAULT_INTERVAL_MS,
            error_dwell_ms: DEFAULT_INTERVAL_MS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ControllerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_level < 1 {
            return Err(ConfigError::Invalid(format!(
                "max_level must be at least 1, got {}",
                self.max_level
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn arrival_dwell(&self) -> Duration {
        Duration::from_millis(self.arrival_dwell_ms)
    }

    pub fn error_dwell(&self) -> Duration {
        Duration::from_millis(self.error_dwell_ms)
    }

    pub fn contains(&self, level: Level) -> bool {
        (1..=self.max_level).contains(&level)
    }
}
