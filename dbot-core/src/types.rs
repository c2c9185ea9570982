//! Core types: user, chat, message, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Label used when counting activity: username, else full name, else first name,
    /// else `user<id>`. Never empty.
    pub fn display_name(&self) -> String {
        if let Some(username) = non_blank(self.username.as_deref()) {
            return username.to_string();
        }

        let full_name = [
            self.first_name.as_deref().unwrap_or("").trim(),
            self.last_name.as_deref().unwrap_or("").trim(),
        ]
        .join(" ")
        .trim()
        .to_string();
        if !full_name.is_empty() {
            return full_name;
        }

        format!("user{}", self.id)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Kind of chat the message arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

/// Chat (group, channel or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub kind: ChatKind,
}

impl Chat {
    /// True for group and supergroup chats, the only ones whose activity is counted.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ChatKind::Group | ChatKind::Supergroup)
    }
}

/// What the inbound update carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Plain text message; `content` is the text.
    Text,
    /// Inline keyboard press; `content` is the callback payload.
    Callback { callback_id: String },
}

/// A single inbound update with user, chat and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub kind: MessageKind,
    /// Transport timestamp of the message (second precision for Telegram).
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Returns the bot command (without leading `/` and `@botname` suffix) if the text starts with one.
    pub fn command(&self) -> Option<&str> {
        if self.kind != MessageKind::Text {
            return None;
        }
        let first = self.content.split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can see it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach the text that was sent back.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific update type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: Option<&str>, first: Option<&str>, last: Option<&str>) -> User {
        User {
            id: 42,
            username: username.map(String::from),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
        }
    }

    fn text_message(content: &str) -> Message {
        Message {
            id: "1".to_string(),
            user: user(Some("alice"), None, None),
            chat: Chat {
                id: -100,
                kind: ChatKind::Group,
            },
            content: content.to_string(),
            kind: MessageKind::Text,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_prefers_username() {
        assert_eq!(user(Some("alice"), Some("Alice"), None).display_name(), "alice");
    }

    #[test]
    fn test_display_name_falls_back_to_full_name() {
        assert_eq!(
            user(None, Some("Alice"), Some("Smith")).display_name(),
            "Alice Smith"
        );
        assert_eq!(user(Some("  "), Some("Alice"), None).display_name(), "Alice");
    }

    #[test]
    fn test_display_name_never_empty() {
        assert_eq!(user(None, Some(""), None).display_name(), "user42");
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(text_message("/stats").command(), Some("stats"));
        assert_eq!(text_message("/stats@counter_bot now").command(), Some("stats"));
        assert_eq!(text_message("hello /stats").command(), None);
        assert_eq!(text_message("/").command(), None);
    }

    #[test]
    fn test_command_ignored_for_callbacks() {
        let mut message = text_message("/stats");
        message.kind = MessageKind::Callback {
            callback_id: "cb".to_string(),
        };
        assert_eq!(message.command(), None);
    }
}
