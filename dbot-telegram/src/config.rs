//! Minimal framework config: token, API URL and optional webhook.
//! The application fills [`TelegramConfig`]; [`webhook_from_env`] reads APP_URL and PORT.

use anyhow::{Context, Result};
use std::env;

/// Port the webhook listener binds when PORT is unset.
pub const DEFAULT_PORT: u16 = 10000;

/// Public URL Telegram posts updates to, and the local port serving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub app_url: String,
    pub port: u16,
}

impl WebhookConfig {
    /// `{app_url}/webhook`, tolerating a trailing slash on the base URL.
    pub fn webhook_url(&self) -> String {
        format!("{}/webhook", self.app_url.trim_end_matches('/'))
    }
}

/// Telegram connectivity settings. `webhook: None` means long polling.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub webhook: Option<WebhookConfig>,
}

/// Reads APP_URL and PORT. Returns `None` when APP_URL is unset or blank.
pub fn webhook_from_env() -> Result<Option<WebhookConfig>> {
    let Some(app_url) = env::var("APP_URL").ok().filter(|s| !s.trim().is_empty()) else {
        return Ok(None);
    };
    let port = match env::var("PORT") {
        Ok(raw) => raw
            .trim()
            .parse::<u16>()
            .with_context(|| format!("PORT is not a valid port number: {}", raw))?,
        Err(_) => DEFAULT_PORT,
    };
    Ok(Some(WebhookConfig { app_url, port }))
}
