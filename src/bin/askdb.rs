//! askdb CLI - interactive natural-language reporting over SQLite.

use anyhow::Context;
use askdb::{repl, AppConfig, AppContext};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ask natural-language questions about a SQLite database
#[derive(Parser)]
#[command(name = "askdb")]
#[command(about = "Natural-language question answering over a SQLite database", long_about = None)]
#[command(version)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "ASKDB_DATABASE", default_value = "core_banking.db")]
    database: PathBuf,

    /// Data dictionary JSON file
    #[arg(long, env = "ASKDB_DICTIONARY", default_value = "data_dictionary.json")]
    dictionary: PathBuf,

    /// Model id (gemini-* uses the Gemini API, anything else Bedrock)
    #[arg(long, env = "ASKDB_MODEL", default_value = "gemini-2.5-pro")]
    model: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials may live in a .env next to the data files.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = AppConfig {
        database: cli.database,
        dictionary: cli.dictionary,
        model: cli.model,
    };

    let ctx = AppContext::initialize(&config)
        .await
        .context("startup failed")?;

    repl::run(&ctx).await?;

    Ok(())
}
