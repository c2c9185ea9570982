//! # Activity bot
//!
//! Counts messages per member in Telegram groups and answers `/stats` with a ranking for the
//! last 1, 7 or 30 days or a custom date range. Wires dbot-telegram, handler-chain, storage and
//! activity-stats; loads config from env.

pub mod cli;
pub mod config;
pub mod format;
pub mod handlers;
pub mod runner;

pub use cli::{load_config, window_from_args, Cli, Commands};
pub use config::BotConfig;
pub use handlers::{PersistenceHandler, StatsHandler};
pub use runner::{build_handler_chain, open_event_store, print_stats, run_bot};
