//! Activity event model.
//!
//! One row of the `activity_events` table: who posted in which conversation, and when.
//! Events are immutable once constructed.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StorageError;

/// Deserialization goes through the same checks as [`ActivityEvent::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawActivityEvent")]
pub struct ActivityEvent {
    id: Uuid,
    conversation_id: i64,
    user_id: i64,
    display_name: String,
    occurred_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawActivityEvent {
    id: Uuid,
    conversation_id: i64,
    user_id: i64,
    display_name: String,
    occurred_at: DateTime<Utc>,
}

impl TryFrom<RawActivityEvent> for ActivityEvent {
    type Error = StorageError;

    fn try_from(raw: RawActivityEvent) -> Result<Self, Self::Error> {
        Self::with_id(
            raw.id,
            raw.conversation_id,
            raw.user_id,
            raw.display_name,
            raw.occurred_at,
        )
    }
}

impl ActivityEvent {
    /// Creates an event with a generated UUID. `occurred_at` is truncated to whole seconds.
    ///
    /// Fails with [`StorageError::InvalidEvent`] when `display_name` is blank.
    pub fn new(
        conversation_id: i64,
        user_id: i64,
        display_name: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Result<Self, StorageError> {
        Self::with_id(
            Uuid::new_v4(),
            conversation_id,
            user_id,
            display_name.into(),
            occurred_at,
        )
    }

    pub(crate) fn with_id(
        id: Uuid,
        conversation_id: i64,
        user_id: i64,
        display_name: String,
        occurred_at: DateTime<Utc>,
    ) -> Result<Self, StorageError> {
        if display_name.trim().is_empty() {
            return Err(StorageError::InvalidEvent(format!(
                "empty display name for user {} in conversation {}",
                user_id, conversation_id
            )));
        }

        Ok(Self {
            id,
            conversation_id,
            user_id,
            display_name,
            occurred_at: occurred_at.trunc_subsecs(0),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn conversation_id(&self) -> i64 {
        self.conversation_id
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Name captured at event time; never re-resolved.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
