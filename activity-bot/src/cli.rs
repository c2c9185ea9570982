//! CLI parser and config loading.

use activity_stats::{Preset, WindowSpec};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "activity-bot")]
#[command(about = "Telegram bot that ranks group members by message count", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Print the ranking for one chat from the configured database.
    #[command(group(ArgGroup::new("window").required(true).args(["days", "from"])))]
    Stats {
        #[arg(long, allow_negative_numbers = true)]
        chat_id: i64,
        /// Trailing period: 1, 7 or 30.
        #[arg(short, long)]
        days: Option<u32>,
        /// First day (YYYY-MM-DD), inclusive.
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        /// Last day (YYYY-MM-DD), inclusive.
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// Turns the `stats` window flags into a window.
pub fn window_from_args(
    days: Option<u32>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<WindowSpec> {
    match (days, from, to) {
        (Some(days), None, None) => Preset::from_days(days)
            .map(WindowSpec::Preset)
            .with_context(|| format!("--days must be 1, 7 or 30, got {}", days)),
        (None, Some(from), Some(to)) => Ok(WindowSpec::range(from, to)?),
        _ => anyhow::bail!("use either --days or --from together with --to"),
    }
}
