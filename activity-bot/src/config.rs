//! Application config, loaded from environment variables.

use anyhow::{Context, Result};
use dbot_telegram::{webhook_from_env, TelegramConfig, WebhookConfig};
use std::env;

/// Default SQLite location for activity events.
pub const DEFAULT_DATABASE_URL: &str = "file:./activity_stats.db";
/// DATABASE_URL value that keeps events in process memory only.
pub const MEMORY_DATABASE_URL: &str = "memory";
pub const DEFAULT_LOG_FILE: &str = "logs/activity-bot.log";

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    /// DATABASE_URL; `memory` selects the in-memory store.
    pub database_url: String,
    pub log_file: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Set when APP_URL is present; otherwise the bot long-polls.
    pub webhook: Option<WebhookConfig>,
}

impl BotConfig {
    /// Loads from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();

        Ok(Self {
            bot_token,
            database_url: database_url_from_env(),
            log_file,
            telegram_api_url,
            webhook: webhook_from_env()?,
        })
    }

    /// Checks token and URLs before anything connects.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if let Some(ref webhook) = self.webhook {
            if reqwest::Url::parse(&webhook.webhook_url()).is_err() {
                anyhow::bail!("APP_URL is set but not a valid URL: {}", webhook.app_url);
            }
        }
        Ok(())
    }

    pub fn telegram(&self) -> TelegramConfig {
        TelegramConfig {
            bot_token: self.bot_token.clone(),
            telegram_api_url: self.telegram_api_url.clone(),
            webhook: self.webhook.clone(),
        }
    }
}

/// DATABASE_URL or the default SQLite file. Used without a token by the `stats` command.
pub fn database_url_from_env() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "BOT_TOKEN",
            "DATABASE_URL",
            "LOG_FILE",
            "TELEGRAM_API_URL",
            "TELOXIDE_API_URL",
            "APP_URL",
            "PORT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        clear_env();
        env::set_var("BOT_TOKEN", "test_token");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.bot_token, "test_token");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.log_file, DEFAULT_LOG_FILE);
        assert!(config.telegram_api_url.is_none());
        assert!(config.webhook.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_config_with_custom_values() {
        clear_env();
        env::set_var("BOT_TOKEN", "custom_token");
        env::set_var("DATABASE_URL", "memory");
        env::set_var("LOG_FILE", "/tmp/bot.log");
        env::set_var("TELOXIDE_API_URL", "http://127.0.0.1:8081");
        env::set_var("APP_URL", "https://counter.example.org");
        env::set_var("PORT", "8443");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.database_url, MEMORY_DATABASE_URL);
        assert_eq!(config.log_file, "/tmp/bot.log");
        assert_eq!(
            config.telegram_api_url.as_deref(),
            Some("http://127.0.0.1:8081")
        );
        let webhook = config.webhook.clone().unwrap();
        assert_eq!(webhook.port, 8443);
        assert_eq!(webhook.webhook_url(), "https://counter.example.org/webhook");
        assert!(config.validate().is_ok());

        let telegram = config.telegram();
        assert_eq!(telegram.bot_token, "custom_token");
        assert_eq!(
            telegram.telegram_api_url.as_deref(),
            Some("http://127.0.0.1:8081")
        );
        assert_eq!(telegram.webhook, Some(webhook));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_config_with_override_token() {
        clear_env();
        env::set_var("BOT_TOKEN", "env_token");

        let config = BotConfig::load(Some("override_token".to_string())).unwrap();

        assert_eq!(config.bot_token, "override_token");
    }

    /// **Test: Missing BOT_TOKEN is an error, not a panic.**
    #[test]
    #[serial]
    fn test_load_config_without_token_fails() {
        clear_env();
        assert!(BotConfig::load(None).is_err());
    }

    #[test]
    #[serial]
    fn test_validate_rejects_bad_api_url() {
        clear_env();
        env::set_var("TELEGRAM_API_URL", "not a url");

        let config = BotConfig::load(Some("t".to_string())).unwrap();

        assert!(config.validate().is_err());
        clear_env();
    }
}
