use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use bullhorn::config::{BannedLists, Config};
use bullhorn::filter::normalize::normalize;
use bullhorn::language::detector::WhatlangDetector;
use bullhorn::language::LanguageGate;
use bullhorn::telegram::client::TelegramClient;
use bullhorn::twitter::client::TwitterClient;

/// Bullhorn: rebroadcasts popular tweets to a Telegram channel.
///
/// Polls Twitter search on a fixed interval, filters the results down
/// to acceptable posts, and forwards anything new to the channel.
#[derive(Parser)]
#[command(name = "bullhorn", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Run the polling loop (fetch → filter → broadcast, forever)
    Run,

    /// Run exactly one fetch → filter → broadcast cycle
    Cycle,

    /// Run the language gate and banned-string filter against a text
    Check {
        /// The text to classify
        text: String,
    },

    /// Show system status (DB stats, last broadcast)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bullhorn=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing Bullhorn database...");
            let config = Config::load()?;
            let store = bullhorn::db::initialize(&config.db_path)?;
            let table_count = store.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nBullhorn is ready. Next step: set up your .env file");
            println!("  (see .env.example for required variables)");
            println!("\nThen run: cargo run -- cycle");
        }

        Commands::Run => {
            let config = Config::load()?;
            config.require_twitter()?;
            config.require_telegram()?;

            let store = bullhorn::db::open(&config.db_path)?;
            let lists = BannedLists::load(&config)?;
            let gate = build_gate(&config);
            let twitter = TwitterClient::new(&config.twitter_api_url, &config.twitter_bearer_token)?;
            let telegram = TelegramClient::new(&config.telegram_api_url, &config.telegram_bot_token)?;

            bullhorn::pipeline::poller::run(
                &twitter,
                &telegram,
                store.as_ref(),
                &gate,
                &lists,
                &config,
            )
            .await;
        }

        Commands::Cycle => {
            let config = Config::load()?;
            config.require_twitter()?;
            config.require_telegram()?;

            let store = bullhorn::db::open(&config.db_path)?;
            let lists = BannedLists::load(&config)?;
            let gate = build_gate(&config);
            let twitter = TwitterClient::new(&config.twitter_api_url, &config.twitter_bearer_token)?;
            let telegram = TelegramClient::new(&config.telegram_api_url, &config.telegram_bot_token)?;

            println!("Running one cycle...");

            let count = bullhorn::pipeline::cycle::run_once(
                &twitter,
                &telegram,
                store.as_ref(),
                &gate,
                &lists,
                &config,
            )
            .await?;

            println!("\n{}", "Cycle complete.".bold());
            println!("  New posts broadcast: {count}");
        }

        Commands::Check { text } => {
            let config = Config::load()?;
            let lists = BannedLists::load(&config)?;
            let gate = build_gate(&config);

            println!("Checking: {}", text.dimmed());

            let language_ok = gate.accepts(&text).await;
            if language_ok {
                println!("  Language ({}): {}", config.search_lang, "accept".green());
            } else {
                println!("  Language ({}): {}", config.search_lang, "reject".red());
            }

            let normalized = normalize(&text);
            if lists.matches_text(&normalized) {
                println!("  Banned strings: {}", "matched — would be dropped".red());
            } else {
                println!("  Banned strings: {}", "no match".green());
            }

            if language_ok && !lists.matches_text(&normalized) {
                println!("\n{}", "This text would pass the filters.".bold());
            } else {
                println!("\n{}", "This text would be filtered out.".bold());
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            if std::path::Path::new(&config.db_path).exists() {
                let store = bullhorn::db::open(&config.db_path)?;
                bullhorn::status::show(store.as_ref(), &config.db_path).await?;
            } else {
                println!("Database: not initialized");
                println!("\nRun `bullhorn init` to set up the database.");
            }
        }
    }

    Ok(())
}

/// Build the language gate from configuration.
fn build_gate(config: &Config) -> LanguageGate {
    LanguageGate::new(
        config.secondary_check,
        config.search_lang.clone(),
        config.lang_hint.clone(),
        config.lang_score_threshold,
        Arc::new(WhatlangDetector::new()),
    )
}
