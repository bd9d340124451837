//! Eviction policies and runtime policy selection

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::{CacheStats, FifoCache, LruCache, SizedCache};
use crate::error::{Result, StoreError};

/// Eviction policy for cache entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Least Recently Used
    #[default]
    Lru,

    /// First In First Out
    Fifo,
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvictionPolicy::Lru => write!(f, "lru"),
            EvictionPolicy::Fifo => write!(f, "fifo"),
        }
    }
}

impl FromStr for EvictionPolicy {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionPolicy::Lru),
            "fifo" => Ok(EvictionPolicy::Fifo),
            other => Err(StoreError::InvalidConfig(format!(
                "unknown eviction policy '{}', expected 'lru' or 'fifo'",
                other
            ))),
        }
    }
}

/// Cache whose eviction policy is chosen at runtime.
#[derive(Debug)]
pub enum PolicyCache<K, V> {
    Lru(LruCache<K, V>),
    Fifo(FifoCache<K, V>),
}

impl<K, V> PolicyCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache with the given policy and capacity (0 = unbounded)
    pub fn with_policy(policy: EvictionPolicy, capacity: usize) -> Self {
        match policy {
            EvictionPolicy::Lru => PolicyCache::Lru(LruCache::new(capacity)),
            EvictionPolicy::Fifo => PolicyCache::Fifo(FifoCache::new(capacity)),
        }
    }

    pub fn policy(&self) -> EvictionPolicy {
        match self {
            PolicyCache::Lru(_) => EvictionPolicy::Lru,
            PolicyCache::Fifo(_) => EvictionPolicy::Fifo,
        }
    }
}

impl<K, V> SizedCache<K, V> for PolicyCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    /// Defaults to LRU; use [`PolicyCache::with_policy`] to choose.
    fn new(capacity: usize) -> Self {
        PolicyCache::with_policy(EvictionPolicy::default(), capacity)
    }

    fn put(&self, key: K, value: V) {
        match self {
            PolicyCache::Lru(cache) => cache.put(key, value),
            PolicyCache::Fifo(cache) => cache.put(key, value),
        }
    }

    fn get(&self, key: &K) -> Result<V> {
        match self {
            PolicyCache::Lru(cache) => cache.get(key),
            PolicyCache::Fifo(cache) => cache.get(key),
        }
    }

    fn remove_entry(&self, key: &K) -> Option<V> {
        match self {
            PolicyCache::Lru(cache) => cache.remove_entry(key),
            PolicyCache::Fifo(cache) => cache.remove_entry(key),
        }
    }

    fn is_cached(&self, key: &K) -> bool {
        match self {
            PolicyCache::Lru(cache) => cache.is_cached(key),
            PolicyCache::Fifo(cache) => cache.is_cached(key),
        }
    }

    fn len(&self) -> usize {
        match self {
            PolicyCache::Lru(cache) => cache.len(),
            PolicyCache::Fifo(cache) => cache.len(),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            PolicyCache::Lru(cache) => cache.capacity(),
            PolicyCache::Fifo(cache) => cache.capacity(),
        }
    }

    fn stats(&self) -> CacheStats {
        match self {
            PolicyCache::Lru(cache) => cache.stats(),
            PolicyCache::Fifo(cache) => cache.stats(),
        }
    }
}
