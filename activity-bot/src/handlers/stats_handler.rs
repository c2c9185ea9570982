//! Commands, keyboard presses and custom range replies.

use activity_stats::{ActivityStats, StatsError, StatsReply, SubmitOutcome};
use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, MessageKind, Result};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::format;

/// Answers `/start`, `/stats`, `/cancel`, keyboard callbacks, and pending custom range text.
/// Everything else continues down the chain.
pub struct StatsHandler {
    bot: Arc<dyn Bot>,
    stats: Arc<ActivityStats>,
}

impl StatsHandler {
    pub fn new(bot: Arc<dyn Bot>, stats: Arc<ActivityStats>) -> Self {
        Self { bot, stats }
    }

    async fn reply(&self, message: &Message, text: String) -> Result<HandlerResponse> {
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn on_command(&self, message: &Message, command: &str) -> Result<HandlerResponse> {
        match command {
            "start" => self.reply(message, format::GREETING.to_string()).await,
            "stats" => {
                self.bot
                    .send_keyboard(&message.chat, format::CHOOSE_PERIOD, &format::period_keyboard())
                    .await?;
                Ok(HandlerResponse::Reply(format::CHOOSE_PERIOD.to_string()))
            }
            "cancel" => {
                let text = if self
                    .stats
                    .cancel_custom_range(message.chat.id, message.user.id)
                    .await
                {
                    format::CANCELLED
                } else {
                    format::NOTHING_TO_CANCEL
                };
                self.reply(message, text.to_string()).await
            }
            _ => Ok(HandlerResponse::Continue),
        }
    }

    async fn on_callback(&self, message: &Message) -> Result<HandlerResponse> {
        let reply = self
            .stats
            .request_stats(message.chat.id, message.user.id, &message.content)
            .await;

        let text = match reply {
            Ok(StatsReply::Report(report)) => format::render_report(&report),
            Ok(StatsReply::PromptForDates) => format::DATES_PROMPT.to_string(),
            Err(StatsError::InvalidSelector(data)) => {
                warn!(data = %data, "Ignoring unknown callback payload");
                return Ok(HandlerResponse::Stop);
            }
            Err(e) => {
                error!(error = %e, chat_id = message.chat.id, "Stats request failed");
                format::UNAVAILABLE.to_string()
            }
        };
        self.reply(message, text).await
    }

    async fn on_text(&self, message: &Message) -> Result<HandlerResponse> {
        let outcome = self
            .stats
            .submit_custom_range(message.chat.id, message.user.id, &message.content)
            .await;

        let text = match outcome {
            Ok(SubmitOutcome::NoPendingSession) => return Ok(HandlerResponse::Continue),
            Ok(SubmitOutcome::Report(report)) => format::render_report(&report),
            Ok(SubmitOutcome::Invalid(reason)) => format::reprompt(&reason.to_string()),
            Err(e) => {
                error!(error = %e, chat_id = message.chat.id, "Custom range stats failed");
                format::UNAVAILABLE.to_string()
            }
        };
        self.reply(message, text).await
    }
}

#[async_trait]
impl Handler for StatsHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match &message.kind {
            MessageKind::Callback { callback_id } => {
                info!(callback_id = %callback_id, data = %message.content, "step: StatsHandler callback");
                self.on_callback(message).await
            }
            MessageKind::Text => match message.command() {
                Some(command) => self.on_command(message, command).await,
                None => self.on_text(message).await,
            },
        }
    }
}
