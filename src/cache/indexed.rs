//! Indexed Entries Module
//!
//! Index + ordering structure shared by the LRU and FIFO policies. The
//! policies wrap a `CacheCore` in a mutex and decide when to reorder.

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;
use tracing::trace;

use crate::cache::{CacheEntry, CacheStats, EntryList, SlotId, UNBOUNDED};

// == Cache Core ==
/// Unsynchronized cache state: key index over an [`EntryList`].
///
/// Invariant: `index.len() == entries.len() <= capacity` unless unbounded,
/// and every indexed slot holds an entry with the same key.
#[derive(Debug)]
pub(crate) struct CacheCore<K, V> {
    index: HashMap<K, SlotId, RandomState>,
    entries: EntryList<K, V>,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> CacheCore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::with_hasher(RandomState::new()),
            entries: EntryList::new(),
            capacity,
            stats: CacheStats::new(capacity),
        }
    }

    pub(crate) fn slot(&self, key: &K) -> Option<SlotId> {
        self.index.get(key).copied()
    }

    /// Looks up `key` for a read, recording a hit or miss.
    pub(crate) fn lookup(&mut self, key: &K) -> Option<SlotId> {
        let slot = self.slot(key);
        match slot {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        slot
    }

    pub(crate) fn value(&self, slot: SlotId) -> Option<&V> {
        self.entries.get(slot).map(|entry| &entry.value)
    }

    pub(crate) fn replace_value(&mut self, slot: SlotId, value: V) {
        if let Some(entry) = self.entries.get_mut(slot) {
            entry.value = value;
        }
    }

    pub(crate) fn move_to_front(&mut self, slot: SlotId) {
        self.entries.move_to_front(slot);
    }

    /// Inserts a key known to be absent, evicting the back entry first if
    /// the insert would exceed capacity.
    pub(crate) fn insert_new(&mut self, key: K, value: V) {
        if self.capacity != UNBOUNDED && self.index.len() >= self.capacity {
            if let Some(evicted) = self.entries.pop_back() {
                self.index.remove(&evicted.key);
                self.stats.record_eviction();
                trace!(len = self.index.len(), "evicted cache entry");
            }
        }

        let slot = self.entries.push_front(CacheEntry::new(key.clone(), value));
        self.index.insert(key, slot);
    }

    pub(crate) fn remove(&mut self, key: &K) -> Option<V> {
        let slot = self.index.remove(key)?;
        self.entries.remove(slot).map(|entry| entry.value)
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.index.len())
    }

    /// Keys front to back (next eviction candidate last).
    #[cfg(test)]
    pub(crate) fn keys(&self) -> Vec<K> {
        self.entries.iter().map(|entry| entry.key.clone()).collect()
    }
}
