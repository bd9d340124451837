//! Error types for the store
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for caches and the transactional store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Key not present in a cache
    #[error("Key not found in cache")]
    KeyNotFound,

    /// `set`/`remove` called without an active transaction
    #[error("Cannot {operation} without an active transaction")]
    NoActiveTransaction {
        /// The rejected operation
        operation: &'static str,
    },

    /// Configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the store.
pub type Result<T> = std::result::Result<T, StoreError>;
