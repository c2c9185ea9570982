//! Storage error types.
//!
//! Returned by [`crate::EventStore`] implementations. None of them is fatal: callers log the
//! failure and keep processing later events and queries.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend could not be reached or the statement failed; transient, retry later.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    /// Event rejected before it reached the backend (e.g. empty display name).
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    /// A stored row could not be decoded back into an event.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::Unavailable(e.to_string())
    }
}
