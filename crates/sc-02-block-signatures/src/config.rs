//! # RPC Configuration
//!
//! Loaded from the `[rpc]` table of a TOML file:
//!
//! ```toml
//! [rpc]
//! request_timeout_ms = 10000
//! user_agent = "signctrl-link/0.1.0"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FetchContext;

/// Block query configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Deadline for one `/block` request, body included.
    pub request_timeout_ms: u64,

    /// `User-Agent` header sent to the node.
    pub user_agent: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 10_000,
            user_agent: format!("signctrl-link/{}", crate::VERSION),
        }
    }
}

/// Errors raised while loading an [`RpcConfig`].
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
    rpc: RpcConfig,
}

impl RpcConfig {
    /// Create a config for testing (short deadline).
    pub fn for_testing() -> Self {
        Self {
            request_timeout_ms: 500,
            ..Self::default()
        }
    }

    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Fetch context bounded by the request timeout.
    pub fn fetch_context(&self) -> FetchContext {
        FetchContext::with_deadline(self.request_timeout())
    }

    /// Reject values the fetcher cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse the `[rpc]` table of a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        file.rpc.validate()?;
        Ok(file.rpc)
    }

    /// Load the `[rpc]` table from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}
