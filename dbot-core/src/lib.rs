//! # dbot-core
//!
//! Core types and traits for the activity bot: [`Bot`], [`Handler`], message, chat and user types,
//! inline keyboards, and tracing initialization. Transport-agnostic; used by dbot-telegram,
//! handler-chain and activity-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, InlineButton, InlineKeyboard};
pub use error::{DbotError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, ChatKind, Handler, HandlerResponse, Message, MessageKind, ToCoreMessage, ToCoreUser,
    User,
};
