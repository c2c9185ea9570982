//! SQLite-backed event store.
//!
//! Every operation checks out its own pooled connection, which goes back to the pool on drop
//! (including early returns through `?`). Timestamps are stored as Unix seconds; `seq` records
//! arrival order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::StorageError;
use crate::event_store::EventStore;
use crate::models::ActivityEvent;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteEventStore {
    pool_manager: SqlitePoolManager,
}

#[derive(sqlx::FromRow)]
struct EventRow {
    id: String,
    conversation_id: i64,
    user_id: i64,
    display_name: String,
    occurred_at: i64,
}

impl TryFrom<EventRow> for ActivityEvent {
    type Error = StorageError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| StorageError::Corrupt(format!("bad event id {}: {}", row.id, e)))?;
        let occurred_at = DateTime::<Utc>::from_timestamp(row.occurred_at, 0).ok_or_else(|| {
            StorageError::Corrupt(format!("bad timestamp {} for event {}", row.occurred_at, id))
        })?;
        ActivityEvent::with_id(
            id,
            row.conversation_id,
            row.user_id,
            row.display_name,
            occurred_at,
        )
        .map_err(|e| StorageError::Corrupt(e.to_string()))
    }
}

impl SqliteEventStore {
    /// Opens (or creates) the database and ensures the schema exists.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        Self::with_pool(pool_manager).await
    }

    /// Uses an already configured pool, e.g. one shared with other components.
    pub async fn with_pool(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating activity_events table if not exist");

        let mut conn = self.pool_manager.acquire().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS activity_events (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                conversation_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                display_name TEXT NOT NULL,
                occurred_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_activity_events_conversation_time \
             ON activity_events(conversation_id, occurred_at)",
        )
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Total number of events stored for a conversation.
    pub async fn count(&self, conversation_id: i64) -> Result<i64, StorageError> {
        let mut conn = self.pool_manager.acquire().await?;
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM activity_events WHERE conversation_id = ?")
                .bind(conversation_id)
                .fetch_one(&mut *conn)
                .await?;
        Ok(count)
    }
}

#[async_trait]
impl EventStore for SqliteEventStore {
    #[instrument(skip(self, event), fields(conversation_id = event.conversation_id(), user_id = event.user_id()))]
    async fn append(&self, event: &ActivityEvent) -> Result<(), StorageError> {
        let mut conn = self.pool_manager.acquire().await?;

        sqlx::query(
            r#"
            INSERT INTO activity_events (id, conversation_id, user_id, display_name, occurred_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(event.id().to_string())
        .bind(event.conversation_id())
        .bind(event.user_id())
        .bind(event.display_name())
        .bind(event.occurred_at().timestamp())
        .execute(&mut *conn)
        .await?;

        debug!(event_id = %event.id(), "Appended activity event");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn query(
        &self,
        conversation_id: i64,
        start: DateTime<Utc>,
        end_exclusive: DateTime<Utc>,
    ) -> Result<Vec<ActivityEvent>, StorageError> {
        let mut conn = self.pool_manager.acquire().await?;

        let rows: Vec<EventRow> = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, conversation_id, user_id, display_name, occurred_at
            FROM activity_events
            WHERE conversation_id = ? AND occurred_at >= ? AND occurred_at < ?
            ORDER BY seq ASC
            "#,
        )
        .bind(conversation_id)
        .bind(start.timestamp())
        .bind(end_exclusive.timestamp())
        .fetch_all(&mut *conn)
        .await?;

        debug!(rows = rows.len(), "Queried activity events");
        rows.into_iter().map(ActivityEvent::try_from).collect()
    }
}
