//! Dispatcher runner: converts teloxide messages and callback queries to core::Message and passes
//! them to HandlerChain. Delivery is long polling, or an axum webhook when configured.

use anyhow::{Context, Result};
use dbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use teloxide::update_listeners::webhooks;
use tracing::{error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};
use super::config::{TelegramConfig, WebhookConfig};

/// Creates the teloxide Bot, pointing it at TELEGRAM_API_URL when set.
pub fn build_teloxide_bot(config: &TelegramConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match config.telegram_api_url {
        Some(ref url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

fn spawn_chain(chain: HandlerChain, core_msg: dbot_core::Message) {
    tokio::spawn(async move {
        info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            message_id = %core_msg.id,
            "step: processing update (handler chain started)"
        );
        if let Err(e) = chain.handle(&core_msg).await {
            error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
        }
    });
}

async fn on_message(msg: Message, chain: HandlerChain) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();

    match msg.text() {
        Some(text) => {
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_content = %text,
                "Received message"
            );
            spawn_chain(chain, core_msg);
        }
        None => {
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                "Received non-text message, skipped"
            );
        }
    }

    Ok(())
}

async fn on_callback(bot: Bot, q: CallbackQuery, chain: HandlerChain) -> ResponseResult<()> {
    // Acknowledge first so the client drops its spinner even if handling fails.
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    match TelegramCallbackWrapper(&q).to_core_opt() {
        Some(core_msg) => {
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                data = %core_msg.content,
                "Received callback"
            );
            spawn_chain(chain, core_msg);
        }
        None => warn!(user_id = q.from.id.0, "Callback without originating message, skipped"),
    }

    Ok(())
}

/// Runs the dispatcher until Ctrl-C. Each text message and callback query is converted to a
/// core::Message and handed to `handler_chain` in its own task.
#[instrument(skip(bot, handler_chain, webhook))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    webhook: Option<WebhookConfig>,
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(username = ?me.user.username, "Connected to Telegram"),
        Err(e) => warn!(error = %e, "get_me failed, continuing"),
    }

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(on_callback))
        .branch(Update::filter_message().endpoint(on_message));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![handler_chain])
        .enable_ctrlc_handler()
        .build();

    match webhook {
        Some(webhook) => {
            let url = reqwest::Url::parse(&webhook.webhook_url())
                .with_context(|| format!("Invalid APP_URL: {}", webhook.app_url))?;
            let addr = ([0, 0, 0, 0], webhook.port).into();
            info!(url = %url, port = webhook.port, "Starting webhook listener");
            let listener = webhooks::axum(bot, webhooks::Options::new(addr, url))
                .await
                .context("Failed to set up webhook")?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
        None => {
            info!("Starting long polling");
            dispatcher.dispatch().await;
        }
    }

    Ok(())
}
