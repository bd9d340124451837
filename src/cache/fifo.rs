//! FIFO Cache Module
//!
//! Implements arrival-order eviction: reads never reorder entries and
//! overwrites keep the original position, so the oldest insert always
//! goes first.

use std::hash::Hash;

use parking_lot::Mutex;

use crate::cache::indexed::CacheCore;
use crate::cache::{CacheStats, SizedCache};
use crate::error::{Result, StoreError};

// == FIFO Cache ==
/// Bounded cache evicting the earliest inserted entry.
#[derive(Debug)]
pub struct FifoCache<K, V> {
    inner: Mutex<CacheCore<K, V>>,
}

impl<K, V> FifoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache holding at most `capacity` entries (0 = unbounded).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheCore::new(capacity)),
        }
    }

    /// Inserts `key`, or updates its value in place if already cached.
    pub fn put(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        match inner.slot(&key) {
            Some(slot) => inner.replace_value(slot, value),
            None => inner.insert_new(key, value),
        }
    }

    pub fn get(&self, key: &K) -> Result<V> {
        let mut inner = self.inner.lock();
        let slot = inner.lookup(key).ok_or(StoreError::KeyNotFound)?;
        inner.value(slot).cloned().ok_or(StoreError::KeyNotFound)
    }

    pub fn remove_entry(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn is_cached(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Keys from newest to oldest arrival.
    #[cfg(test)]
    pub(crate) fn keys(&self) -> Vec<K> {
        self.inner.lock().keys()
    }
}

impl<K, V> SizedCache<K, V> for FifoCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    fn new(capacity: usize) -> Self {
        FifoCache::new(capacity)
    }

    fn put(&self, key: K, value: V) {
        FifoCache::put(self, key, value)
    }

    fn get(&self, key: &K) -> Result<V> {
        FifoCache::get(self, key)
    }

    fn remove_entry(&self, key: &K) -> Option<V> {
        FifoCache::remove_entry(self, key)
    }

    fn is_cached(&self, key: &K) -> bool {
        FifoCache::is_cached(self, key)
    }

    fn len(&self) -> usize {
        FifoCache::len(self)
    }

    fn capacity(&self) -> usize {
        FifoCache::capacity(self)
    }

    fn stats(&self) -> CacheStats {
        FifoCache::stats(self)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, keys: &[&'static str]) -> FifoCache<&'static str, String> {
        let cache = FifoCache::new(capacity);
        for key in keys {
            cache.put(*key, format!("value_{}", key));
        }
        cache
    }

    #[test]
    fn test_fifo_put_and_get() {
        let cache = filled(3, &["key1"]);
        assert_eq!(cache.get(&"key1").unwrap(), "value_key1");
        assert_eq!(cache.get(&"key2"), Err(StoreError::KeyNotFound));
    }

    #[test]
    fn test_fifo_evicts_in_arrival_order() {
        let cache = filled(3, &["a", "b", "c", "d"]);

        assert_eq!(cache.len(), 3);
        assert!(!cache.is_cached(&"a"));
        assert_eq!(cache.keys(), vec!["d", "c", "b"]);
    }

    #[test]
    fn test_fifo_get_does_not_reorder() {
        let cache = filled(3, &["a", "b", "c"]);

        // Reading the oldest entry does not save it
        cache.get(&"a").unwrap();
        cache.get(&"a").unwrap();
        cache.put("d", "value_d".to_string());

        assert!(!cache.is_cached(&"a"));
        assert!(cache.is_cached(&"b"));

        cache.get(&"b").unwrap();
        cache.put("e", "value_e".to_string());
        assert!(!cache.is_cached(&"b"));
        assert_eq!(cache.keys(), vec!["e", "d", "c"]);
    }

    #[test]
    fn test_fifo_overwrite_keeps_position() {
        let cache = filled(3, &["a", "b", "c"]);

        cache.put("a", "updated".to_string());
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&"a").unwrap(), "updated");
        assert_eq!(cache.keys(), vec!["c", "b", "a"]);

        // "a" still arrived first
        cache.put("d", "value_d".to_string());
        assert!(!cache.is_cached(&"a"));
    }

    #[test]
    fn test_fifo_remove() {
        let cache = filled(3, &["a", "b"]);

        assert_eq!(SizedCache::remove(&cache, &"a"), "value_a");
        assert_eq!(SizedCache::remove(&cache, &"missing"), "");
        assert_eq!(cache.keys(), vec!["b"]);
    }

    #[test]
    fn test_fifo_removed_key_rearrives_at_front() {
        let cache = filled(3, &["a", "b", "c"]);

        cache.remove_entry(&"a");
        cache.put("a", "again".to_string());
        cache.put("d", "value_d".to_string());

        assert!(!cache.is_cached(&"b"));
        assert_eq!(cache.keys(), vec!["d", "a", "c"]);
    }

    #[test]
    fn test_fifo_unbounded() {
        let cache = FifoCache::new(0);
        for i in 0..500u32 {
            cache.put(i, ());
        }
        assert_eq!(cache.len(), 500);
        assert!(cache.is_cached(&0));
    }

    #[test]
    fn test_fifo_stats() {
        let cache = filled(1, &["a", "b"]);
        cache.get(&"b").unwrap();
        let _ = cache.get(&"a");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
