//! Transactional Store Module
//!
//! Committed data lives in a backing map fronted by a [`SizedCache`].
//! Writes go through per-session transactions and only reach the map and
//! the cache on commit.
//!
//! # Locking
//! All store state (backing map, transaction registry, buffers) sits behind
//! one store-wide mutex. The cache has its own internal mutex. The store
//! lock is always taken first and the cache never calls back into the
//! store, so the order is store then cache on every path.

mod session;
mod transaction;

pub use session::{Session, SessionId};
pub use transaction::{Change, Transaction};

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::cache::{CacheStats, LruCache, PolicyCache, SizedCache};
use crate::config::Config;
use crate::error::{Result, StoreError};

// == Database ==
/// Operation set of a transactional key-value database.
///
/// `begin`/`commit`/`abort` report failure through `false`; only `set` and
/// `remove` without an active transaction are errors.
pub trait Database {
    /// Opens a transaction; `false` if one is already active.
    fn begin_transaction(&self) -> bool;

    /// Applies buffered changes; `false` if no transaction is active.
    fn commit_transaction(&self) -> bool;

    /// Discards buffered changes; `false` if no transaction is active.
    fn abort_transaction(&self) -> bool;

    /// Reads `key`, returning `""` when it has no value.
    fn get(&self, key: &str) -> String;

    /// Buffers a write and returns the written value.
    fn set(&self, key: &str, value: &str) -> Result<String>;

    /// Buffers a delete and returns the value visible before it.
    fn remove(&self, key: &str) -> Result<String>;
}

/// State guarded by the store-wide lock
#[derive(Debug, Default)]
struct StoreState {
    /// Committed key-value data
    data: HashMap<String, String>,
    /// Active transactions by owning session
    transactions: HashMap<SessionId, Transaction>,
}

// == Transactional Store ==
/// In-memory key-value store with per-session transactions.
///
/// The thread-bound methods (`begin`, `get`, ...) act on the calling
/// thread's implicit session; [`TransactionalStore::session`] hands out
/// explicit ones.
#[derive(Debug)]
pub struct TransactionalStore<C = LruCache<String, String>> {
    state: Mutex<StoreState>,
    cache: C,
}

impl TransactionalStore<LruCache<String, String>> {
    /// Creates a store fronted by an LRU cache of `cache_capacity` entries
    /// (0 = unbounded).
    pub fn new(cache_capacity: usize) -> Self {
        Self::with_cache(LruCache::new(cache_capacity))
    }
}

impl TransactionalStore<PolicyCache<String, String>> {
    /// Creates a store using the configured eviction policy and capacity.
    pub fn from_config(config: &Config) -> Self {
        debug!(
            policy = %config.eviction_policy,
            capacity = config.cache_capacity,
            "creating store from config"
        );
        Self::with_cache(PolicyCache::with_policy(
            config.eviction_policy,
            config.cache_capacity,
        ))
    }
}

impl<C: SizedCache<String, String>> TransactionalStore<C> {
    // == Constructors ==
    /// Creates a store whose cache is built through [`SizedCache::new`].
    pub fn with_capacity(cache_capacity: usize) -> Self {
        Self::with_cache(C::new(cache_capacity))
    }

    /// Creates an empty store around an existing cache.
    pub fn with_cache(cache: C) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            cache,
        }
    }

    // == Thread-bound operations ==
    /// Opens a transaction for the calling thread.
    ///
    /// Returns `false` if the thread already has one.
    pub fn begin(&self) -> bool {
        self.begin_in(SessionId::current())
    }

    /// Applies the calling thread's transaction to the map and the cache.
    ///
    /// Returns `false` if the thread has no active transaction.
    pub fn commit(&self) -> bool {
        self.commit_in(SessionId::current())
    }

    /// Discards the calling thread's transaction.
    pub fn abort(&self) -> bool {
        self.abort_in(SessionId::current())
    }

    /// Reads `key` as seen by the calling thread.
    ///
    /// Lookup order: own transaction buffer, cache, backing map (which
    /// populates the cache). Returns `""` if no source has a value.
    pub fn get(&self, key: &str) -> String {
        self.get_in(SessionId::current(), key)
    }

    /// Buffers `value` for `key` in the calling thread's transaction.
    ///
    /// Fails with [`StoreError::NoActiveTransaction`] without a transaction.
    pub fn set(&self, key: &str, value: &str) -> Result<String> {
        self.set_in(SessionId::current(), key, value)
    }

    /// Buffers a delete of `key`, returning the value the calling thread
    /// saw before it.
    ///
    /// Fails with [`StoreError::NoActiveTransaction`] without a transaction;
    /// in that case nothing, not even the cache, is touched.
    pub fn remove(&self, key: &str) -> Result<String> {
        self.remove_in(SessionId::current(), key)
    }

    /// Whether the calling thread has an active transaction.
    pub fn in_transaction(&self) -> bool {
        self.in_transaction_in(SessionId::current())
    }

    // == Sessions ==
    /// Opens an explicit session with its own transaction slot.
    pub fn session(&self) -> Session<'_, C> {
        Session::new(self)
    }

    // == Introspection ==
    /// Number of transactions currently open across all sessions.
    pub fn active_transactions(&self) -> usize {
        self.state.lock().transactions.len()
    }

    /// Number of committed keys.
    pub fn len(&self) -> usize {
        self.state.lock().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // == Session-scoped operations ==
    pub(crate) fn begin_in(&self, session: SessionId) -> bool {
        let mut state = self.state.lock();
        if state.transactions.contains_key(&session) {
            return false;
        }

        state.transactions.insert(session, Transaction::new());
        debug!(%session, "transaction started");
        true
    }

    pub(crate) fn commit_in(&self, session: SessionId) -> bool {
        let mut state = self.state.lock();
        let transaction = match state.transactions.remove(&session) {
            Some(transaction) => transaction,
            None => return false,
        };

        let changes = transaction.len();
        for (key, change) in transaction.into_changes() {
            match change {
                Change::Set(value) => {
                    state.data.insert(key.clone(), value.clone());
                    self.cache.put(key, value);
                }
                Change::Delete => {
                    state.data.remove(&key);
                    self.cache.remove_entry(&key);
                }
            }
        }

        debug!(%session, changes, "transaction committed");
        true
    }

    pub(crate) fn abort_in(&self, session: SessionId) -> bool {
        let mut state = self.state.lock();
        match state.transactions.remove(&session) {
            Some(transaction) => {
                debug!(%session, discarded = transaction.len(), "transaction aborted");
                true
            }
            None => false,
        }
    }

    pub(crate) fn get_in(&self, session: SessionId, key: &str) -> String {
        let state = self.state.lock();
        self.read(&state, session, key)
    }

    pub(crate) fn set_in(&self, session: SessionId, key: &str, value: &str) -> Result<String> {
        let mut state = self.state.lock();
        let transaction = state
            .transactions
            .get_mut(&session)
            .ok_or_else(|| Self::no_transaction(session, "set"))?;

        transaction.set(key, value);
        Ok(value.to_string())
    }

    pub(crate) fn remove_in(&self, session: SessionId, key: &str) -> Result<String> {
        let mut state = self.state.lock();
        if !state.transactions.contains_key(&session) {
            return Err(Self::no_transaction(session, "remove"));
        }

        let previous = self.read(&state, session, key);
        if let Some(transaction) = state.transactions.get_mut(&session) {
            transaction.delete(key);
        }
        Ok(previous)
    }

    pub(crate) fn in_transaction_in(&self, session: SessionId) -> bool {
        self.state.lock().transactions.contains_key(&session)
    }

    /// Visibility chain; caller holds the store lock.
    fn read(&self, state: &StoreState, session: SessionId, key: &str) -> String {
        if let Some(change) = state
            .transactions
            .get(&session)
            .and_then(|transaction| transaction.lookup(key))
        {
            return change.visible_value();
        }

        let key = key.to_string();
        // KeyNotFound just means "try the backing map"
        if let Ok(value) = self.cache.get(&key) {
            return value;
        }

        match state.data.get(&key) {
            Some(value) => {
                trace!(key = %key, "populating cache from backing map");
                self.cache.put(key, value.clone());
                value.clone()
            }
            None => String::new(),
        }
    }

    fn no_transaction(session: SessionId, operation: &'static str) -> StoreError {
        warn!(%session, operation, "write attempted without an active transaction");
        StoreError::NoActiveTransaction { operation }
    }
}

impl<C: SizedCache<String, String>> Database for TransactionalStore<C> {
    fn begin_transaction(&self) -> bool {
        self.begin()
    }

    fn commit_transaction(&self) -> bool {
        self.commit()
    }

    fn abort_transaction(&self) -> bool {
        self.abort()
    }

    fn get(&self, key: &str) -> String {
        TransactionalStore::get(self, key)
    }

    fn set(&self, key: &str, value: &str) -> Result<String> {
        TransactionalStore::set(self, key, value)
    }

    fn remove(&self, key: &str) -> Result<String> {
        TransactionalStore::remove(self, key)
    }
}
