use crate::error::StorageError;
use crate::models::ActivityEvent;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Append-only log of activity events, queryable by conversation and time range.
///
/// Implementations must be safe under concurrent `append` and `query` calls. A query observes
/// every append that completed before it started.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persists one event. An error is a non-fatal signal; the event may be retried by the caller.
    async fn append(&self, event: &ActivityEvent) -> Result<(), StorageError>;

    /// Returns the conversation's events with `start <= occurred_at < end_exclusive`, in arrival order.
    async fn query(
        &self,
        conversation_id: i64,
        start: DateTime<Utc>,
        end_exclusive: DateTime<Utc>,
    ) -> Result<Vec<ActivityEvent>, StorageError>;
}
