//! Binary for the activity bot: `run` starts the Telegram bot, `stats` prints a ranking offline.

use activity_bot::{load_config, print_stats, run_bot, window_from_args, Cli, Commands};
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Stats {
            chat_id,
            days,
            from,
            to,
        } => {
            let window = window_from_args(days, from, to)?;
            let database_url = activity_bot::config::database_url_from_env();
            println!("{}", print_stats(&database_url, chat_id, window).await?);
            Ok(())
        }
    }
}
