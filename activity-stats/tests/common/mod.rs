//! Shared fixtures for activity-stats integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use storage::{ActivityEvent, EventStore, InMemoryEventStore, StorageError};
use tokio::sync::Notify;

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

pub fn event(conversation_id: i64, user_id: i64, name: &str, when: DateTime<Utc>) -> ActivityEvent {
    ActivityEvent::new(conversation_id, user_id, name, when).unwrap()
}

/// Wraps an in-memory store and fails every call while `down` is set.
#[derive(Clone, Default)]
pub struct FlakyStore {
    inner: InMemoryEventStore,
    down: Arc<AtomicBool>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.down.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable("database is locked".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl EventStore for FlakyStore {
    async fn append(&self, event: &ActivityEvent) -> Result<(), StorageError> {
        self.check()?;
        self.inner.append(event).await
    }

    async fn query(
        &self,
        conversation_id: i64,
        start: DateTime<Utc>,
        end_exclusive: DateTime<Utc>,
    ) -> Result<Vec<ActivityEvent>, StorageError> {
        self.check()?;
        self.inner.query(conversation_id, start, end_exclusive).await
    }
}

/// Wraps an in-memory store; while `hold` is set, `query` signals `entered` and then waits on
/// `release`, so tests can act while a query is in flight.
#[derive(Clone, Default)]
pub struct GatedStore {
    inner: InMemoryEventStore,
    hold: Arc<AtomicBool>,
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl GatedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_hold(&self, hold: bool) {
        self.hold.store(hold, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventStore for GatedStore {
    async fn append(&self, event: &ActivityEvent) -> Result<(), StorageError> {
        self.inner.append(event).await
    }

    async fn query(
        &self,
        conversation_id: i64,
        start: DateTime<Utc>,
        end_exclusive: DateTime<Utc>,
    ) -> Result<Vec<ActivityEvent>, StorageError> {
        if self.hold.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.inner.query(conversation_id, start, end_exclusive).await
    }
}
