//! Reel - command-line front end for the media catalog

mod config;
mod walk;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use crate::config::CliConfig;
use reel_core::{truncate_text, ItemId};
use reel_server_client::{ReelServerClient, UploadOutcome};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Longest title shown in the listing
const TITLE_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "reel")]
#[command(about = "Browse, upload and play the Reel media catalog", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path (defaults to ./reel.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog server URL, overrides the configuration
    #[arg(short, long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server is reachable
    Health,
    /// List every item in the catalog
    List,
    /// Upload video or audio files
    Upload {
        /// Files to upload; unsupported types are skipped
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Delete an item by id
    Delete {
        /// Item id as shown by `list`
        id: i64,
    },
    /// Play through the catalog headlessly and print the player's events
    Walk {
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.server {
        config.server.url = url;
    }

    let client = ReelServerClient::new(config.server_config())
        .with_context(|| format!("Cannot use server URL {:?}", config.server.url))?;

    match cli.command {
        Commands::Health => health(&client).await?,
        Commands::List => list(&client).await?,
        Commands::Upload { files } => upload(&client, files).await?,
        Commands::Delete { id } => delete(&client, id).await?,
        Commands::Walk { json } => run_walk(&client, &config, json).await?,
    }

    Ok(())
}

async fn health(client: &ReelServerClient) -> anyhow::Result<()> {
    let health = client.health().await?;

    if !health.is_ok() {
        bail!("Server at {} reports status {:?}", client.url(), health.status);
    }

    println!(
        "{} is up: {} items, {} thumbnails",
        client.url(),
        health.video_count,
        health.thumbnail_count
    );
    Ok(())
}

async fn list(client: &ReelServerClient) -> anyhow::Result<()> {
    let items = client.library().fetch_items().await?;

    if items.is_empty() {
        println!("No items in the catalog");
        return Ok(());
    }

    println!("{:>5}  {:<5}  {:>9}  Title", "ID", "Type", "Size");
    for item in &items {
        println!(
            "{:>5}  {:<5}  {:>9}  {}",
            item.id.to_string(),
            item.type_label(),
            item.size_label(),
            truncate_text(&item.display_name, TITLE_WIDTH)
        );
    }
    println!("\n{} items", items.len());

    Ok(())
}

async fn upload(client: &ReelServerClient, files: Vec<PathBuf>) -> anyhow::Result<()> {
    let summary = client
        .uploads()
        .upload_batch(files, |progress| {
            let status = match &progress.outcome {
                UploadOutcome::Uploaded { id } => format!("uploaded as #{}", id),
                UploadOutcome::Failed { reason } => format!("failed: {}", reason),
                UploadOutcome::Skipped => "skipped (not a video or audio file)".to_string(),
            };
            println!(
                "[{:>3.0}%] {}: {}",
                progress.percent(),
                progress.current_file,
                status
            );
        })
        .await;

    println!(
        "{} uploaded, {} failed, {} skipped",
        summary.uploaded, summary.failed, summary.skipped
    );

    if summary.needs_refresh() {
        let items = client.library().fetch_items().await?;
        println!("Catalog now has {} items", items.len());
    }

    if summary.failed > 0 {
        bail!("{} of {} uploads failed", summary.failed, summary.total());
    }

    Ok(())
}

async fn delete(client: &ReelServerClient, id: i64) -> anyhow::Result<()> {
    let id = ItemId::new(id);
    client.library().delete_item(id).await?;
    println!("Deleted item {}", id);
    Ok(())
}

async fn run_walk(client: &ReelServerClient, config: &CliConfig, json: bool) -> anyhow::Result<()> {
    let transcript = walk::run(client, config.controller_config(), config.player.clip).await?;

    for event in &transcript {
        if json {
            println!("{}", serde_json::to_string(event)?);
        } else {
            println!("{}", walk::describe(event));
        }
    }

    Ok(())
}
