//! LRU Cache Module
//!
//! Implements Least Recently Used eviction.
//!
//! Access/insert of `X` moves it to the front; on overflow the back entry
//! is discarded:
//!
//! ```text
//! Before: [A] <-> [B] <-> [C] <-> [D]
//! After:  [X] <-> [A] <-> [B] <-> [C]   (D evicted at capacity)
//! ```

use std::hash::Hash;

use parking_lot::Mutex;

use crate::cache::indexed::CacheCore;
use crate::cache::{CacheStats, SizedCache};
use crate::error::{Result, StoreError};

// == LRU Cache ==
/// Bounded cache evicting the least recently used entry.
///
/// Both `put` and `get` count as a use.
#[derive(Debug)]
pub struct LruCache<K, V> {
    inner: Mutex<CacheCore<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries (0 = unbounded).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheCore::new(capacity)),
        }
    }

    // == Put ==
    /// Inserts or overwrites `key` and marks it most recently used.
    pub fn put(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        match inner.slot(&key) {
            Some(slot) => {
                inner.replace_value(slot, value);
                inner.move_to_front(slot);
            }
            None => inner.insert_new(key, value),
        }
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    pub fn get(&self, key: &K) -> Result<V> {
        let mut inner = self.inner.lock();
        let slot = inner.lookup(key).ok_or(StoreError::KeyNotFound)?;
        inner.move_to_front(slot);
        inner.value(slot).cloned().ok_or(StoreError::KeyNotFound)
    }

    // == Remove ==
    /// Removes `key`, returning its value if it was cached.
    pub fn remove_entry(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Checks presence without refreshing recency.
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

    /// Keys from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys(&self) -> Vec<K> {
        self.inner.lock().keys()
    }
}

impl<K, V> SizedCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    fn new(capacity: usize) -> Self {
        LruCache::new(capacity)
    }

    fn put(&self, key: K, value: V) {
        LruCache::put(self, key, value)
    }

    fn get(&self, key: &K) -> Result<V> {
        LruCache::get(self, key)
    }

    fn remove_entry(&self, key: &K) -> Option<V> {
        LruCache::remove_entry(self, key)
    }

    fn is_cached(&self, key: &K) -> bool {
        LruCache::is_cached(self, key)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn stats(&self) -> CacheStats {
        LruCache::stats(self)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, keys: &[&'static str]) -> LruCache<&'static str, String> {
        let cache = LruCache::new(capacity);
        for key in keys {
            cache.put(*key, format!("value_{}", key));
        }
        cache
    }

    #[test]
    fn test_lru_new() {
        let cache: LruCache<String, String> = LruCache::new(3);
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.capacity(), 3);
    }

    #[test]
    fn test_lru_put_and_get() {
        let cache = filled(3, &["key1"]);
        assert_eq!(cache.get(&"key1").unwrap(), "value_key1");
    }

    #[test]
    fn test_lru_get_missing_key() {
        let cache = filled(3, &["key1"]);
        assert_eq!(cache.get(&"nonexistent"), Err(StoreError::KeyNotFound));
    }

    #[test]
    fn test_lru_evicts_least_recently_put() {
        let cache = filled(3, &["key1", "key2", "key3", "key4"]);

        assert_eq!(cache.len(), 3);
        assert!(!cache.is_cached(&"key1"));
        assert!(cache.is_cached(&"key2"));
        assert!(cache.is_cached(&"key3"));
        assert!(cache.is_cached(&"key4"));
    }

    #[test]
    fn test_lru_get_refreshes_recency() {
        let cache = filled(3, &["key1", "key2", "key3"]);

        // key1 becomes most recently used, key2 is now oldest
        cache.get(&"key1").unwrap();
        cache.put("key4", "value_key4".to_string());

        assert!(cache.is_cached(&"key1"));
        assert!(!cache.is_cached(&"key2"));
        assert_eq!(cache.keys(), vec!["key4", "key1", "key3"]);
    }

    #[test]
    fn test_lru_put_existing_refreshes_recency() {
        let cache = filled(3, &["a", "b", "c"]);

        cache.put("a", "updated".to_string());
        cache.put("d", "value_d".to_string());

        assert!(!cache.is_cached(&"b"));
        assert_eq!(cache.get(&"a").unwrap(), "updated");
    }

    #[test]
    fn test_lru_overwrite_keeps_size() {
        let cache = filled(3, &["key1"]);
        cache.put("key1", "v2".to_string());

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"key1").unwrap(), "v2");
    }

    #[test]
    fn test_lru_is_cached_does_not_reorder() {
        let cache = filled(2, &["a", "b"]);

        assert!(cache.is_cached(&"a"));
        cache.put("c", "value_c".to_string());

        assert!(!cache.is_cached(&"a"));
        assert_eq!(cache.keys(), vec!["c", "b"]);
    }

    #[test]
    fn test_lru_remove() {
        let cache = filled(3, &["key1", "key2"]);

        assert_eq!(SizedCache::remove(&cache, &"key1"), "value_key1");
        assert_eq!(SizedCache::remove(&cache, &"key1"), "");
        assert_eq!(cache.remove_entry(&"key1"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_remove_entry_distinguishes_default_value() {
        let cache: LruCache<&str, String> = LruCache::new(3);
        cache.put("empty", String::new());

        assert_eq!(cache.remove_entry(&"empty"), Some(String::new()));
        assert_eq!(cache.remove_entry(&"empty"), None);
    }

    #[test]
    fn test_lru_unbounded() {
        let cache = LruCache::new(0);
        for i in 0..500 {
            cache.put(i, i * 2);
        }
        assert_eq!(cache.len(), 500);
        assert_eq!(cache.get(&0).unwrap(), 0);
    }

    #[test]
    fn test_lru_capacity_one() {
        let cache = filled(1, &["a", "b"]);
        assert_eq!(cache.keys(), vec!["b"]);
    }

    #[test]
    fn test_lru_stats() {
        let cache = filled(2, &["a", "b", "c"]);
        cache.get(&"c").unwrap();
        let _ = cache.get(&"a");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.capacity, 2);
    }

    #[test]
    fn test_lru_shared_across_threads() {
        let cache: LruCache<String, usize> = LruCache::new(64);

        std::thread::scope(|scope| {
            for t in 0..4 {
                let cache = &cache;
                scope.spawn(move || {
                    for i in 0..100 {
                        cache.put(format!("t{}_{}", t, i), i);
                        let _ = cache.get(&format!("t{}_{}", t, i / 2));
                    }
                });
            }
        });

        assert_eq!(cache.len(), 64);
    }
}
