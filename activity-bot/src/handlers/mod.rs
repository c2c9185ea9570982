//! Handler implementations: activity persistence and stats conversation.

mod persistence_handler;
mod stats_handler;

pub use persistence_handler::PersistenceHandler;
pub use stats_handler::StatsHandler;
