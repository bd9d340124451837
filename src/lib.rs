//! txn_kv - An in-memory transactional key-value store
//!
//! Committed data sits in a backing map fronted by a bounded cache with a
//! pluggable eviction policy (LRU or FIFO). Writes are buffered per session
//! and folded into the map and the cache on commit.

pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;

pub use cache::{EvictionPolicy, FifoCache, LruCache, PolicyCache, SizedCache};
pub use config::Config;
pub use error::{Result, StoreError};
pub use logging::init_tracing;
pub use store::{Database, Session, SessionId, TransactionalStore};
