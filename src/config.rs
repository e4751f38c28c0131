//! Configuration management with validation and defaults

use crate::errors::FairnessError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default public block-explorer endpoint used as the external entropy beacon.
pub const DEFAULT_BEACON_URL: &str = "https://blockchain.info/latestblock";

/// Session configuration with validation.
///
/// Every field has a working default; construct with `FairnessConfig::default()`
/// and override what you need.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FairnessConfig {
    /// Whether beacon responses are cached between rounds.
    pub use_cache: bool,
    /// How long a cached beacon hash stays valid (milliseconds).
    pub cache_ttl_ms: u64,
    /// Server seed length in bytes.
    pub server_seed_length: usize,
    /// Secret salt length in bytes.
    pub secret_salt_length: usize,
    /// Beacon fetch timeout (milliseconds). The in-flight request is
    /// cancelled when it elapses.
    pub fetch_timeout_ms: u64,
    /// Block-explorer endpoint returning JSON with a string `hash` field.
    pub beacon_url: String,
}

impl Default for FairnessConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            cache_ttl_ms: 60_000,
            server_seed_length: 32,
            secret_salt_length: 4,
            fetch_timeout_ms: 5_000,
            beacon_url: DEFAULT_BEACON_URL.to_string(),
        }
    }
}

impl FairnessConfig {
    /// Validate configuration for logical consistency
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server_seed_length == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "server_seed_length must be > 0".to_string(),
            ));
        }

        if self.secret_salt_length == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "secret_salt_length must be > 0".to_string(),
            ));
        }

        if self.fetch_timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "fetch_timeout_ms must be > 0".to_string(),
            ));
        }

        if self.use_cache && self.cache_ttl_ms == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "cache_ttl_ms must be > 0 when use_cache is enabled".to_string(),
            ));
        }

        if self.beacon_url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "beacon_url".to_string(),
            ));
        }

        Ok(())
    }

    /// Convert to duration types for internal use
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    InvalidValue(String),
    MissingRequired(String),
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValidationError::InvalidValue(msg) => {
                write!(f, "Invalid configuration value: {}", msg)
            }
            ConfigValidationError::MissingRequired(msg) => {
                write!(f, "Missing required configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

impl From<ConfigValidationError> for FairnessError {
    fn from(e: ConfigValidationError) -> Self {
        FairnessError::InvalidArgument(e.to_string())
    }
}
