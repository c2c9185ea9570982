//! # dbot-telegram
//!
//! Telegram bot framework layer: adapters, [`dbot_core::Bot`] implementation, minimal config and
//! the dispatcher runner (long polling or webhook).
//! Handles only Telegram connectivity and handler-chain execution; no persistence or stats logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{webhook_from_env, TelegramConfig, WebhookConfig, DEFAULT_PORT};
pub use runner::{build_teloxide_bot, run_dispatcher};
