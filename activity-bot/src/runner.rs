use activity_stats::{ActivityStats, AggregationEngine, Clock, SystemClock, WindowSpec};
use anyhow::{Context, Result};
use dbot_core::{init_tracing, Bot};
use dbot_telegram::{build_teloxide_bot, run_dispatcher, TelegramBotAdapter};
use handler_chain::HandlerChain;
use std::sync::Arc;
use storage::{EventStore, InMemoryEventStore, SqliteEventStore};
use tracing::{error, info, instrument};

use crate::config::{BotConfig, MEMORY_DATABASE_URL};
use crate::format;
use crate::handlers::{PersistenceHandler, StatsHandler};

/// `memory` gives a process-local store; anything else is treated as a SQLite URL.
#[instrument]
pub async fn open_event_store(database_url: &str) -> Result<Arc<dyn EventStore>> {
    if database_url == MEMORY_DATABASE_URL {
        info!("Using in-memory event store");
        return Ok(Arc::new(InMemoryEventStore::new()));
    }

    let store = SqliteEventStore::new(database_url).await.map_err(|e| {
        error!(error = %e, database_url = %database_url, "Failed to initialize event storage");
        anyhow::anyhow!("Failed to initialize event storage: {}", e)
    })?;
    Ok(Arc::new(store))
}

/// Persistence first so every countable message is recorded before the stats handler answers.
pub fn build_handler_chain(bot: Arc<dyn Bot>, stats: Arc<ActivityStats>) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(PersistenceHandler::new(stats.clone())))
        .add_handler(Arc::new(StatsHandler::new(bot, stats)))
}

/// Main entry: validate config, init logging, open storage, then dispatch until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        webhook = config.webhook.is_some(),
        "Initializing bot"
    );

    let store = open_event_store(&config.database_url).await?;
    let stats = Arc::new(ActivityStats::new(store));

    let telegram = config.telegram();
    let teloxide_bot = build_teloxide_bot(&telegram);
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let handler_chain = build_handler_chain(bot, stats);

    info!("Bot started successfully");
    run_dispatcher(teloxide_bot, handler_chain, telegram.webhook)
        .await
        .context("Dispatcher stopped with an error")
}

/// Renders a ranking straight from storage, without Telegram.
pub async fn print_stats(database_url: &str, chat_id: i64, window: WindowSpec) -> Result<String> {
    let store = open_event_store(database_url).await?;
    let report = AggregationEngine::new(store)
        .report(chat_id, &window, SystemClock.now())
        .await
        .context("Failed to compute stats")?;
    Ok(format::render_report(&report))
}
