//! In-memory event store.
//!
//! Same contract as the SQLite store; data is lost on restart. Used by tests and by
//! `DATABASE_URL=memory` runs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::event_store::EventStore;
use crate::models::ActivityEvent;

#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<ActivityEvent>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events across all conversations.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, event: &ActivityEvent) -> Result<(), StorageError> {
        self.events.write().await.push(event.clone());
        Ok(())
    }

    async fn query(
        &self,
        conversation_id: i64,
        start: DateTime<Utc>,
        end_exclusive: DateTime<Utc>,
    ) -> Result<Vec<ActivityEvent>, StorageError> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| {
                e.conversation_id() == conversation_id
                    && e.occurred_at() >= start
                    && e.occurred_at() < end_exclusive
            })
            .cloned()
            .collect())
    }
}
