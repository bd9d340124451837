//! Configuration Module
//!
//! Handles loading and managing store configuration from environment variables.

use std::env;

use serde::{Deserialize, Serialize};

use crate::cache::EvictionPolicy;
use crate::error::{Result, StoreError};

/// Default cache capacity when none is configured.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Store configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of entries the cache can hold, 0 = unbounded
    pub cache_capacity: usize,
    /// Which entry the cache discards on overflow
    pub eviction_policy: EvictionPolicy,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset or unparsable values fall back to their defaults.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries, 0 = unbounded (default: 1000)
    /// - `CACHE_POLICY` - `lru` or `fifo` (default: lru)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`Config::from_env`], but rejects values that do not parse.
    pub fn try_from_env() -> Result<Self> {
        Self::try_from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: lookup("CACHE_CAPACITY")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.cache_capacity),
            eviction_policy: lookup("CACHE_POLICY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.eviction_policy),
        }
    }

    fn try_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let cache_capacity = match lookup("CACHE_CAPACITY") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                StoreError::InvalidConfig(format!("CACHE_CAPACITY must be a number, got '{}'", raw))
            })?,
            None => defaults.cache_capacity,
        };

        let eviction_policy = match lookup("CACHE_POLICY") {
            Some(raw) => raw.parse()?,
            None => defaults.eviction_policy,
        };

        Ok(Self {
            cache_capacity,
            eviction_policy,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            eviction_policy: EvictionPolicy::Lru,
        }
    }
}
