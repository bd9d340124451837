//! Cache Module
//!
//! Bounded in-memory caches with pluggable eviction policies.
//!
//! Every cache implements [`SizedCache`], the only interface the
//! transactional store needs from its cache. Two policies are provided:
//! - [`LruCache`] - evicts the least recently put/read entry
//! - [`FifoCache`] - evicts the earliest inserted entry
//!
//! [`PolicyCache`] picks one of them at runtime.

mod entry;
mod fifo;
mod indexed;
mod list;
mod lru;
mod policy;
mod stats;


// Re-export public types
pub use entry::CacheEntry;
pub use fifo::FifoCache;
pub use list::{EntryList, SlotId};
pub use lru::LruCache;
pub use policy::{EvictionPolicy, PolicyCache};
pub use stats::CacheStats;

use crate::error::Result;

// == Public Constants ==
/// Capacity value meaning "never evict".
pub const UNBOUNDED: usize = 0;

// == Sized Cache Contract ==
/// Capability contract for a bounded, internally synchronized cache.
///
/// Implementations serialize every operation behind their own lock, so a
/// single instance can be shared across threads without external locking.
/// They never call back into their owner, which lets the store hold its own
/// lock while calling into the cache.
pub trait SizedCache<K, V>: Send + Sync {
    /// Creates a cache holding at most `capacity` entries ([`UNBOUNDED`] = no limit).
    fn new(capacity: usize) -> Self
    where
        Self: Sized;

    /// Inserts or overwrites `key`, evicting one entry on overflow.
    fn put(&self, key: K, value: V);

    /// Returns a copy of the value for `key`.
    ///
    /// Fails with [`StoreError::KeyNotFound`](crate::error::StoreError::KeyNotFound)
    /// when the key is absent.
    fn get(&self, key: &K) -> Result<V>;

    /// Removes `key`, returning its value if it was present.
    fn remove_entry(&self, key: &K) -> Option<V>;

    /// Removes `key`, returning its prior value or `V::default()` if absent.
    fn remove(&self, key: &K) -> V
    where
        V: Default,
    {
        self.remove_entry(key).unwrap_or_default()
    }

    /// Presence check without touching the eviction order.
    fn is_cached(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity ([`UNBOUNDED`] = no limit).
    fn capacity(&self) -> usize;

    /// Current statistics snapshot.
    fn stats(&self) -> CacheStats;
}
