use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use livechat_core::Collection;
use livechat_infrastructure::{ConfigService, DataStore};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "livechat")]
#[command(about = "LiveChat Pro - inspect and seed the flat-file record store", long_about = None)]
struct Cli {
    /// Data directory (overrides LIVECHAT_DATA_DIR and config.toml)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to ~/.config/livechat/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every record of a collection
    List { collection: Collection },
    /// Print one record by id (date for analytics)
    Get { collection: Collection, id: String },
    /// Append a record given as JSON
    Add { collection: Collection, json: String },
    /// Shallow-merge a JSON object into a record
    Update {
        collection: Collection,
        id: String,
        patch: String,
    },
    /// Insert or replace the analytics entry for a date
    UpsertAnalytics { json: String },
    /// Print the messages of a chat
    Messages { chat_id: String },
    /// Write the demo sample data
    Seed {
        /// Overwrite collections that already hold records
        #[arg(long)]
        force: bool,
    },
    /// Print the resolved config and data file locations
    Paths,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigService::load_from(path),
        None => ConfigService::load_default(),
    }
    .context("Failed to load configuration")?;
    let store = DataStore::from_config(cli.data_dir, &config)?;

    let output = match cli.command {
        Commands::List { collection } => Some(commands::records::list(&store, collection).await?),
        Commands::Get { collection, id } => {
            Some(commands::records::get(&store, collection, &id).await?)
        }
        Commands::Add { collection, json } => {
            Some(commands::records::add(&store, collection, &json).await?)
        }
        Commands::Update {
            collection,
            id,
            patch,
        } => commands::records::update(&store, collection, &id, &patch).await?,
        Commands::UpsertAnalytics { json } => {
            Some(commands::records::upsert_analytics(&store, &json).await?)
        }
        Commands::Messages { chat_id } => {
            Some(commands::records::messages(&store, &chat_id).await?)
        }
        Commands::Seed { force } => Some(commands::seed::run(&store, force).await?),
        Commands::Paths => Some(commands::paths::describe(&store, cli.config.as_deref())),
    };

    if let Some(value) = output {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }

    Ok(())
}
