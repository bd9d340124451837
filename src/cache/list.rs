//! Entry List Module
//!
//! Arena-backed doubly linked list used as the ordering structure of every
//! eviction cache. Slots are addressed by stable `usize` handles; freed slots
//! are recycled through a free list, so moving and unlinking are O(1).

use crate::cache::CacheEntry;

/// Slot handle into an [`EntryList`].
pub type SlotId = usize;

/// Node in the doubly linked list
#[derive(Debug)]
struct Node<K, V> {
    entry: CacheEntry<K, V>,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

// == Entry List ==
/// Ordered sequence of cache entries.
///
/// - Front = most recently used / newest arrival
/// - Back = next eviction candidate
#[derive(Debug)]
pub struct EntryList<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    free_list: Vec<SlotId>,
    len: usize,
}

impl<K, V> Default for EntryList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> EntryList<K, V> {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an entry at the front and returns its slot handle.
    pub fn push_front(&mut self, entry: CacheEntry<K, V>) -> SlotId {
        let idx = self.alloc_slot();
        self.slots[idx] = Some(Node {
            entry,
            prev: None,
            next: self.head,
        });

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.slots[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }

        self.len += 1;
        idx
    }

    // == Move To Front ==
    /// Splices an existing slot to the front of the list.
    pub fn move_to_front(&mut self, idx: SlotId) {
        if self.head == Some(idx) || self.slots.get(idx).map_or(true, Option::is_none) {
            return;
        }

        self.unlink(idx);

        if let Some(node) = &mut self.slots[idx] {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.slots[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    // == Remove ==
    /// Unlinks a slot and returns its entry, recycling the slot.
    pub fn remove(&mut self, idx: SlotId) -> Option<CacheEntry<K, V>> {
        if self.slots.get(idx).map_or(true, Option::is_none) {
            return None;
        }

        self.unlink(idx);
        let node = self.slots[idx].take()?;
        self.free_list.push(idx);
        self.len -= 1;
        Some(node.entry)
    }

    // == Pop Back ==
    /// Removes and returns the entry at the back (the eviction candidate).
    pub fn pop_back(&mut self) -> Option<CacheEntry<K, V>> {
        let tail_idx = self.tail?;
        self.remove(tail_idx)
    }

    // == Accessors ==
    /// Returns the entry stored in a slot.
    pub fn get(&self, idx: SlotId) -> Option<&CacheEntry<K, V>> {
        self.slots.get(idx)?.as_ref().map(|node| &node.entry)
    }

    /// Returns a mutable reference to the entry stored in a slot.
    pub fn get_mut(&mut self, idx: SlotId) -> Option<&mut CacheEntry<K, V>> {
        self.slots.get_mut(idx)?.as_mut().map(|node| &mut node.entry)
    }

    /// Returns the entry at the back without removing it.
    pub fn back(&self) -> Option<&CacheEntry<K, V>> {
        self.get(self.tail?)
    }

    /// Number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates entries front to back.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Drops every entry and all recycled slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn unlink(&mut self, idx: SlotId) {
        let (prev, next) = match &self.slots[idx] {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.slots[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.slots[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn alloc_slot(&mut self) -> SlotId {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            self.slots.push(None);
            self.slots.len() - 1
        }
    }
}

// == Iterator ==
/// Front-to-back iterator over an [`EntryList`].
pub struct Iter<'a, K, V> {
    list: &'a EntryList<K, V>,
    cursor: Option<SlotId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a CacheEntry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.list.slots.get(idx)?.as_ref()?;
        self.cursor = node.next;
        Some(&node.entry)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &EntryList<&'static str, u32>) -> Vec<&'static str> {
        list.iter().map(|entry| entry.key).collect()
    }

    #[test]
    fn test_list_new() {
        let list: EntryList<&str, u32> = EntryList::new();
        assert!(list.is_empty());
        assert!(list.back().is_none());
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = EntryList::new();
        list.push_front(CacheEntry::new("a", 1));
        list.push_front(CacheEntry::new("b", 2));
        list.push_front(CacheEntry::new("c", 3));

        assert_eq!(list.len(), 3);
        assert_eq!(keys(&list), vec!["c", "b", "a"]);
        assert_eq!(list.back().map(|e| e.key), Some("a"));
    }

    #[test]
    fn test_move_to_front() {
        let mut list = EntryList::new();
        let a = list.push_front(CacheEntry::new("a", 1));
        list.push_front(CacheEntry::new("b", 2));
        let c = list.push_front(CacheEntry::new("c", 3));

        list.move_to_front(a);
        assert_eq!(keys(&list), vec!["a", "c", "b"]);

        // Already at front
        list.move_to_front(a);
        assert_eq!(keys(&list), vec!["a", "c", "b"]);

        list.move_to_front(c);
        assert_eq!(keys(&list), vec!["c", "a", "b"]);
        assert_eq!(list.back().map(|e| e.key), Some("b"));
    }

    #[test]
    fn test_remove_middle_and_reuse_slot() {
        let mut list = EntryList::new();
        list.push_front(CacheEntry::new("a", 1));
        let b = list.push_front(CacheEntry::new("b", 2));
        list.push_front(CacheEntry::new("c", 3));

        let removed = list.remove(b).unwrap();
        assert_eq!(removed.into_parts(), ("b", 2));
        assert_eq!(keys(&list), vec!["c", "a"]);

        // Freed slot is recycled
        let d = list.push_front(CacheEntry::new("d", 4));
        assert_eq!(d, b);
        assert_eq!(keys(&list), vec!["d", "c", "a"]);

        // Stale handle is a no-op
        assert!(list.remove(99).is_none());
    }

    #[test]
    fn test_pop_back_drains_in_order() {
        let mut list = EntryList::new();
        list.push_front(CacheEntry::new("a", 1));
        list.push_front(CacheEntry::new("b", 2));

        assert_eq!(list.pop_back().map(|e| e.key), Some("a"));
        assert_eq!(list.pop_back().map(|e| e.key), Some("b"));
        assert!(list.pop_back().is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut list = EntryList::new();
        let a = list.push_front(CacheEntry::new("a", 1));

        if let Some(entry) = list.get_mut(a) {
            entry.value = 10;
        }
        assert_eq!(list.get(a).map(|e| e.value), Some(10));
    }

    #[test]
    fn test_clear() {
        let mut list = EntryList::new();
        list.push_front(CacheEntry::new("a", 1));
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
    }
}
