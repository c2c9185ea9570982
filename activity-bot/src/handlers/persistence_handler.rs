//! Handler that records group text messages as activity events in before().

use activity_stats::ActivityStats;
use async_trait::async_trait;
use dbot_core::{Handler, Message, MessageKind, Result};
use std::sync::Arc;
use storage::ActivityEvent;
use tracing::{debug, info, instrument, warn};

/// Ingests each countable message; always continues, even when storage fails.
#[derive(Clone)]
pub struct PersistenceHandler {
    stats: Arc<ActivityStats>,
}

impl PersistenceHandler {
    pub fn new(stats: Arc<ActivityStats>) -> Self {
        Self { stats }
    }

    /// Group or supergroup text from a known sender that is not a bot command.
    fn is_countable(message: &Message) -> bool {
        message.kind == MessageKind::Text
            && message.chat.is_group()
            && message.user.id != 0
            && message.command().is_none()
            && !message.content.trim().is_empty()
    }
}

#[async_trait]
impl Handler for PersistenceHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        if !Self::is_countable(message) {
            debug!(chat_id = message.chat.id, "step: PersistenceHandler skipped");
            return Ok(true);
        }

        let event = match ActivityEvent::new(
            message.chat.id,
            message.user.id,
            message.user.display_name(),
            message.created_at,
        ) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, user_id = message.user.id, "Message not convertible to event");
                return Ok(true);
            }
        };

        if self.stats.ingest(&event).await.is_ok() {
            info!(
                user_id = message.user.id,
                chat_id = message.chat.id,
                message_id = %message.id,
                "step: PersistenceHandler before done, event saved"
            );
        }

        Ok(true)
    }
}
