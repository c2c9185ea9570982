#![allow(dead_code)]

pub mod mock_bot;

use chrono::{DateTime, TimeZone, Utc};
use dbot_core::{Chat, ChatKind, Message, MessageKind, User};

pub const GROUP_ID: i64 = -100_123;

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

pub fn user(id: i64, username: &str) -> User {
    User {
        id,
        username: Some(username.to_string()),
        first_name: Some(username.to_uppercase()),
        last_name: None,
    }
}

fn message(chat: Chat, from: User, content: &str, kind: MessageKind, when: DateTime<Utc>) -> Message {
    Message {
        id: format!("{}-{}", from.id, when.timestamp()),
        user: from,
        chat,
        content: content.to_string(),
        kind,
        created_at: when,
    }
}

pub fn group_text(from: User, content: &str, when: DateTime<Utc>) -> Message {
    let chat = Chat {
        id: GROUP_ID,
        kind: ChatKind::Supergroup,
    };
    message(chat, from, content, MessageKind::Text, when)
}

pub fn private_text(from: User, content: &str, when: DateTime<Utc>) -> Message {
    let chat = Chat {
        id: from.id,
        kind: ChatKind::Private,
    };
    message(chat, from, content, MessageKind::Text, when)
}

pub fn callback(from: User, data: &str, when: DateTime<Utc>) -> Message {
    let chat = Chat {
        id: GROUP_ID,
        kind: ChatKind::Supergroup,
    };
    let kind = MessageKind::Callback {
        callback_id: format!("cb-{}", from.id),
    };
    message(chat, from, data, kind, when)
}

/// Store that fails every call, as a locked or missing database would.
pub struct DownStore;

#[async_trait::async_trait]
impl storage::EventStore for DownStore {
    async fn append(&self, _event: &storage::ActivityEvent) -> Result<(), storage::StorageError> {
        Err(storage::StorageError::Unavailable("database is locked".to_string()))
    }

    async fn query(
        &self,
        _conversation_id: i64,
        _start: DateTime<Utc>,
        _end_exclusive: DateTime<Utc>,
    ) -> Result<Vec<storage::ActivityEvent>, storage::StorageError> {
        Err(storage::StorageError::Unavailable("database is locked".to_string()))
    }
}
