//! Session identity and explicit session handles
//!
//! A session owns at most one transaction. Every thread gets an implicit
//! session the first time it touches a store; [`Session`] handles carry
//! their own id so one thread can drive several independent transactions,
//! or hand a transaction over to another thread.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::cache::SizedCache;
use crate::error::Result;
use crate::store::{Database, TransactionalStore};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_SESSION: SessionId = SessionId::next();
}

// == Session Id ==
/// Identifies the owner of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Allocates a process-unique id.
    pub(crate) fn next() -> Self {
        SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The implicit session bound to the calling thread.
    pub fn current() -> Self {
        THREAD_SESSION.with(|id| *id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

// == Session Handle ==
/// Explicit session over a [`TransactionalStore`].
///
/// Dropping a session with an open transaction aborts it.
pub struct Session<'a, C: SizedCache<String, String>> {
    store: &'a TransactionalStore<C>,
    id: SessionId,
}

impl<'a, C: SizedCache<String, String>> Session<'a, C> {
    pub(crate) fn new(store: &'a TransactionalStore<C>) -> Self {
        Self {
            store,
            id: SessionId::next(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn begin(&self) -> bool {
        self.store.begin_in(self.id)
    }

    pub fn commit(&self) -> bool {
        self.store.commit_in(self.id)
    }

    pub fn abort(&self) -> bool {
        self.store.abort_in(self.id)
    }

    pub fn get(&self, key: &str) -> String {
        self.store.get_in(self.id, key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<String> {
        self.store.set_in(self.id, key, value)
    }

    pub fn remove(&self, key: &str) -> Result<String> {
        self.store.remove_in(self.id, key)
    }

    pub fn in_transaction(&self) -> bool {
        self.store.in_transaction_in(self.id)
    }
}

impl<C: SizedCache<String, String>> Drop for Session<'_, C> {
    fn drop(&mut self) {
        if self.store.abort_in(self.id) {
            warn!(session = %self.id, "session dropped with an open transaction, aborted");
        }
    }
}

impl<C: SizedCache<String, String>> fmt::Debug for Session<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("id", &self.id).finish()
    }
}

impl<C: SizedCache<String, String>> Database for Session<'_, C> {
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
        Session::get(self, key)
    }

    fn set(&self, key: &str, value: &str) -> Result<String> {
        Session::set(self, key, value)
    }

    fn remove(&self, key: &str) -> Result<String> {
        Session::remove(self, key)
    }
}
