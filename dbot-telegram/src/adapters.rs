//! Adapters from Telegram (teloxide) types to dbot_core types.
//! Depends only on teloxide and dbot_core type definitions.

use dbot_core::{Chat, ChatKind, Message, MessageKind, ToCoreMessage, ToCoreUser, User};
use teloxide::types::CallbackQuery;

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn to_core_chat(chat: &teloxide::types::Chat) -> Chat {
    let kind = if chat.is_private() {
        ChatKind::Private
    } else if chat.is_supergroup() {
        ChatKind::Supergroup
    } else if chat.is_group() {
        ChatKind::Group
    } else {
        ChatKind::Channel
    };
    Chat {
        id: chat.id.0,
        kind,
    }
}

fn anonymous_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
///
/// `created_at` is Telegram's own send date, not the time the update reached us.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(anonymous_user),
            chat: to_core_chat(&self.0.chat),
            content: self.0.text().unwrap_or("").to_string(),
            kind: MessageKind::Text,
            created_at: self.0.date,
        }
    }
}

/// Wraps an inline keyboard press. `content` carries the callback payload.
///
/// Returns `None` from [`TelegramCallbackWrapper::to_core_opt`] when the originating message is
/// unavailable, since the chat is then unknown.
pub struct TelegramCallbackWrapper<'a>(pub &'a CallbackQuery);

impl<'a> TelegramCallbackWrapper<'a> {
    pub fn to_core_opt(&self) -> Option<Message> {
        let origin = self.0.message.as_ref()?;
        Some(Message {
            id: self.0.id.to_string(),
            user: TelegramUserWrapper(&self.0.from).to_core(),
            chat: to_core_chat(origin.chat()),
            content: self.0.data.clone().unwrap_or_default(),
            kind: MessageKind::Callback {
                callback_id: self.0.id.to_string(),
            },
            created_at: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: TelegramUserWrapper converts teloxide User to core User with correct id, username, first_name, last_name.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
        assert_eq!(core_user.display_name(), "testuser");
    }

    /// **Test: A user without username is labelled by full name.**
    #[test]
    fn test_telegram_user_without_username_uses_full_name() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(7),
            is_bot: false,
            first_name: "Ada".to_string(),
            last_name: Some("Lovelace".to_string()),
            username: None,
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        };

        assert_eq!(TelegramUserWrapper(&user).to_core().display_name(), "Ada Lovelace");
    }
}
