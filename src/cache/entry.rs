//! Cache Entry Module
//!
//! Defines the key/value pair owned by a cache's ordering structure.

// == Cache Entry ==
/// A single cached key/value pair.
///
/// Entries are owned by the [`EntryList`](crate::cache::EntryList); the cache
/// index only stores slot handles pointing at them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    /// The lookup key
    pub key: K,
    /// The stored value
    pub value: V,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new cache entry.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Splits the entry into its key and value.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}
