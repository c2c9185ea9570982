//! Bot abstraction for sending replies and inline keyboards.
//!
//! [`Bot`] is transport-agnostic; dbot-telegram implements it via teloxide and tests substitute a recorder.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// One inline button: visible label and the payload delivered back on press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub callback_data: String,
}

impl InlineButton {
    pub fn new(label: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            callback_data: callback_data.into(),
        }
    }
}

/// Inline keyboard laid out as rows of buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

impl InlineKeyboard {
    pub fn new(rows: Vec<Vec<InlineButton>>) -> Self {
        Self { rows }
    }

    /// Iterates all buttons row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &InlineButton> {
        self.rows.iter().flatten()
    }
}

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Sends a text message with an inline keyboard attached.
    async fn send_keyboard(&self, chat: &Chat, text: &str, keyboard: &InlineKeyboard)
        -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_buttons_in_row_order() {
        let keyboard = InlineKeyboard::new(vec![
            vec![InlineButton::new("a", "1"), InlineButton::new("b", "2")],
            vec![InlineButton::new("c", "3")],
        ]);
        let data: Vec<&str> = keyboard
            .buttons()
            .map(|b| b.callback_data.as_str())
            .collect();
        assert_eq!(data, vec!["1", "2", "3"]);
    }
}
