//! # Dial Configuration
//!
//! Timing knobs of the dial supervisor, loadable from the `[dial]` table of a
//! TOML file:
//!
//! ```toml
//! [dial]
//! retry_interval_ms = 1000
//! connect_timeout_ms = 5000
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dial supervisor configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialConfig {
    /// Wait between connection attempts after the first failure.
    pub retry_interval_ms: u64,

    /// Upper bound for a single connect attempt. An attempt that runs out of
    /// time counts as a failed attempt and is retried.
    pub connect_timeout_ms: u64,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            retry_interval_ms: 1000,
            connect_timeout_ms: 5000,
        }
    }
}

/// Errors raised while loading a [`DialConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {error}")]
    Io {
        /// File path.
        path: String,
        /// OS error description.
        error: String,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    dial: DialConfig,
}

impl DialConfig {
    /// Create a config for testing (short intervals).
    pub fn for_testing() -> Self {
        Self {
            retry_interval_ms: 10,
            connect_timeout_ms: 200,
        }
    }

    /// Retry interval as a `Duration`.
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    /// Connect timeout as a `Duration`.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Reject values the supervisor cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "retry_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "connect_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse the `[dial]` table of a TOML document. Missing keys keep their
    /// defaults; other tables are ignored.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        file.dial.validate()?;
        Ok(file.dial)
    }

    /// Load the `[dial]` table from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}
