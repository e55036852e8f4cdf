//! Store error types

use thiserror::Error;

use crate::persistence::PersistenceError;

/// Errors that can occur in the store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The snapshot lock was poisoned by a panicking writer
    #[error("Lock error: {0}")]
    Lock(String),

    /// Durable storage failed outside the log-and-continue effect path
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        StoreError::Lock(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
