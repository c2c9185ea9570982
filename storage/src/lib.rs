//! Storage crate: the append-only activity event log.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – ActivityEvent
//! - [`event_store`] – EventStore trait
//! - [`sqlite_store`] – SqliteEventStore (SQLite via sqlx)
//! - [`memory_store`] – InMemoryEventStore
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod event_store;
mod memory_store;
mod models;
mod sqlite_pool;
mod sqlite_store;


pub use error::StorageError;
pub use event_store::EventStore;
pub use memory_store::InMemoryEventStore;
pub use models::ActivityEvent;
pub use sqlite_pool::SqlitePoolManager;
pub use sqlite_store::SqliteEventStore;
