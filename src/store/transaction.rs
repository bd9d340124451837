//! Transaction Module
//!
//! Per-session buffer of uncommitted changes.

use std::collections::HashMap;

// == Change ==
/// A buffered change for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Set the key to this value
    Set(String),
    /// Tombstone: delete the key
    Delete,
}

impl Change {
    /// Value a read through this change observes ("" for a tombstone).
    pub fn visible_value(&self) -> String {
        match self {
            Change::Set(value) => value.clone(),
            Change::Delete => String::new(),
        }
    }
}

// == Transaction ==
/// Uncommitted changes of one session.
///
/// Keys remember the order they were first written in; commit applies them
/// in that order.
#[derive(Debug, Default)]
pub struct Transaction {
    changes: HashMap<String, Change>,
    order: Vec<String>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers `value` for `key`, replacing any earlier change.
    pub fn set(&mut self, key: &str, value: &str) {
        self.record(key, Change::Set(value.to_string()));
    }

    /// Buffers a tombstone for `key`.
    pub fn delete(&mut self, key: &str) {
        self.record(key, Change::Delete);
    }

    /// Buffered change for `key`, if any.
    pub fn lookup(&self, key: &str) -> Option<&Change> {
        self.changes.get(key)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Consumes the transaction, yielding changes in first-write order.
    pub fn into_changes(self) -> impl Iterator<Item = (String, Change)> {
        let mut changes = self.changes;
        self.order.into_iter().filter_map(move |key| {
            let change = changes.remove(&key)?;
            Some((key, change))
        })
    }

    fn record(&mut self, key: &str, change: Change) {
        if self.changes.insert(key.to_string(), change).is_none() {
            self.order.push(key.to_string());
        }
    }
}
