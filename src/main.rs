#![allow(missing_docs)]

//! Numlens binary — number-lookup Telegram bot.
//!
//! `numlens start` runs the bot; `numlens history <user-id>` prints a
//! user's stored lookups without touching Telegram.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use numlens::config::{self, load_config, Config};
use numlens::cooldown::CooldownGate;
use numlens::history::HistoryStore;
use numlens::logging;
use numlens::lookup::{LookupClient, LookupService};
use numlens::report::ReportFormatter;
use numlens::telegram;

#[derive(Parser)]
#[command(name = "numlens", version, about = "Phone-number lookup bot for Telegram")]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the bot (long-running; production logging).
    Start,

    /// Print a user's stored lookup history and exit.
    History {
        /// Telegram user ID whose history to print.
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli.config).context("failed to load configuration")?;

    match cli.command {
        Command::Start => start(config).await,
        Command::History { user_id } => {
            logging::init_cli();
            show_history(&config, &user_id).await
        }
    }
}

/// Run the bot until shutdown.
///
/// Missing credentials are the only fatal condition; everything past
/// startup is converted to user-facing messages or logged and recovered.
async fn start(config: Config) -> Result<()> {
    let logs_dir = config::data_dir()?.join("logs");
    let _logging_guard = logging::init_production(&logs_dir)?;

    info!("numlens starting");

    let token = std::env::var(&config.telegram.bot_token_env).with_context(|| {
        format!(
            "bot token not found: set the {} environment variable",
            config.telegram.bot_token_env
        )
    })?;

    let history = Arc::new(HistoryStore::open(&config.history.file));
    let cooldown = Arc::new(CooldownGate::new(config.cooldown.window()));
    let client = LookupClient::new(
        config.lookup.api_base.clone(),
        config.lookup.request_timeout(),
    )
    .context("failed to build lookup HTTP client")?;
    let formatter = ReportFormatter::new(config.lookup.owner_label.clone());
    let service = Arc::new(LookupService::new(client, formatter, Arc::clone(&history)));

    telegram::run_bot(
        &token,
        service,
        history,
        cooldown,
        config.lookup.owner_label,
    )
    .await
}

/// Print a user's stored lookups to stdout (CLI mode, no Telegram).
async fn show_history(config: &Config, user_id: &str) -> Result<()> {
    let store = HistoryStore::open(&config.history.file);
    let records = store.list(user_id).await;

    if records.is_empty() {
        println!("No lookup history for user {user_id}.");
        return Ok(());
    }

    for (index, record) in records.iter().enumerate() {
        println!(
            "{:2}. {} \u{2014} {} ({} UTC)",
            index.saturating_add(1),
            record.number,
            record.summary,
            record.time.format("%Y-%m-%d %H:%M:%S"),
        );
    }
    Ok(())
}
