//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::MAX_TTL;
use crate::error::{CacheError, Result};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Lifetime of every entry in seconds; also the sweep period
    pub ttl_secs: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    // == From Env ==
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset variables take their defaults. A variable that is set but does
    /// not parse, or a result that fails [`Config::validate`], is an
    /// `InvalidConfiguration` error.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1024)
    /// - `CACHE_TTL_SECS` - Entry lifetime in seconds (default: 50000)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            capacity: parse_var("CACHE_CAPACITY")?.unwrap_or(defaults.capacity),
            ttl_secs: parse_var("CACHE_TTL_SECS")?.unwrap_or(defaults.ttl_secs),
            server_port: parse_var("SERVER_PORT")?.unwrap_or(defaults.server_port),
        };
        config.validate()?;
        Ok(config)
    }

    // == Validate ==
    /// Rejects a configuration the cache cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "CACHE_CAPACITY must be greater than zero".to_string(),
            ));
        }
        if self.ttl_secs == 0 {
            return Err(CacheError::InvalidConfiguration(
                "CACHE_TTL_SECS must be greater than zero".to_string(),
            ));
        }
        if self.ttl_secs > MAX_TTL.as_secs() {
            return Err(CacheError::InvalidConfiguration(format!(
                "CACHE_TTL_SECS must not exceed {}",
                MAX_TTL.as_secs()
            )));
        }
        Ok(())
    }

    /// Returns the entry lifetime as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Reads and parses `name`; `Ok(None)` when the variable is unset.
fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            CacheError::InvalidConfiguration(format!("{} has invalid value '{}'", name, raw))
        }),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(CacheError::InvalidConfiguration(format!(
            "{} is not valid unicode",
            name
        ))),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1024,
            ttl_secs: 50_000,
            server_port: 8080,
        }
    }
}
