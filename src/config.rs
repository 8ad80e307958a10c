//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default entry lifetime in seconds.
pub const DEFAULT_CACHE_TTL: u64 = 60;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Entry TTL in seconds, identical for every entry of a cache
    pub cache_ttl: u64,
    /// Sweep period in seconds, None = sweep once per TTL
    pub sweep_interval: Option<u64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL` - Entry TTL in seconds (default: 60)
    /// - `SWEEP_INTERVAL` - Sweep period in seconds (default: same as `CACHE_TTL`)
    pub fn from_env() -> Self {
        Self {
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Rejects values that would produce a cache evicting everything instantly.
    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl == 0 {
            return Err(CacheError::InvalidConfig(
                "CACHE_TTL must be greater than zero".to_string(),
            ));
        }
        if self.sweep_interval == Some(0) {
            return Err(CacheError::InvalidConfig(
                "SWEEP_INTERVAL must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Entry TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Effective sweep period as a Duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval.unwrap_or(self.cache_ttl))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
            sweep_interval: None,
        }
    }
}
