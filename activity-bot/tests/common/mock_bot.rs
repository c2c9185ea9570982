//! Mock implementation of [`dbot_core::Bot`] for integration tests.
//!
//! Records every outgoing text and keyboard so tests can assert on replies without hitting Telegram.

use async_trait::async_trait;
use dbot_core::{Bot, Chat, DbotError, InlineKeyboard, Message, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// One recorded outgoing message.
#[derive(Debug, Clone)]
pub struct SentRecord {
    pub chat_id: i64,
    pub text: String,
    pub keyboard: Option<InlineKeyboard>,
}

/// Mock Bot that stores sent messages in order. `fail_sends` makes every send return an error.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<SentRecord>>,
    fail_sends: AtomicBool,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<SentRecord> {
        self.sent.lock().await.clone()
    }

    /// Text of the most recent outgoing message.
    pub async fn last_text(&self) -> Option<String> {
        self.sent.lock().await.last().map(|r| r.text.clone())
    }

    async fn record(&self, chat: &Chat, text: &str, keyboard: Option<InlineKeyboard>) -> Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(DbotError::Bot("send failed".to_string()));
        }
        self.sent.lock().await.push(SentRecord {
            chat_id: chat.id,
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(chat, text, None).await
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(&message.chat, text, None).await
    }

    async fn send_keyboard(&self, chat: &Chat, text: &str, keyboard: &InlineKeyboard) -> Result<()> {
        self.record(chat, text, Some(keyboard.clone())).await
    }
}
