//! Interactive session surface: a line-oriented REPL over the orchestrator.
//!
//! Plain input is a chat turn; `/image <path>` uploads a photo; `/quit`
//! ends the session.

use anyhow::Context;
use arachne::engine::{Captioner, ConversationEngine, Orchestrator, Retriever};
use arachne::index::{CatalogIndex, HttpEmbedder};
use arachne::llm::CompletionClient;
use arachne::{load_catalog, Config, ConversationState};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "arachne", about = "Interactive clothing assistant")]
struct Args {
    /// Folder containing the catalog images
    #[arg(long)]
    images_folder: PathBuf,

    /// CSV file with the clothing catalog
    #[arg(long)]
    csv_path: PathBuf,

    /// Optional TOML config file; otherwise environment variables are used
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    let items = load_catalog(&args.csv_path)?;
    let embedder = Arc::new(HttpEmbedder::new(&config)?);
    let mut index = CatalogIndex::new(embedder);
    index
        .add(items)
        .await
        .context("failed to embed the catalog")?;
    info!(items = index.len(), "catalog index ready");

    let client = Arc::new(CompletionClient::new(&config)?);
    let orchestrator = Orchestrator::new(
        Arc::new(Captioner::new(client.clone(), &config.vision_model)),
        Arc::new(ConversationEngine::new(client, &config.chat_model)),
        Arc::new(Retriever::new(Arc::new(index))),
        args.images_folder.clone(),
        config.retrieval_limit,
    );

    let mut state = ConversationState::new();
    let stdin = std::io::stdin();
    println!("arachne ready. Type a message, /image <path>, or /quit.");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line == "/quit" {
            break;
        }

        let outcome = if let Some(path) = line.strip_prefix("/image ") {
            match image::open(path.trim()) {
                Ok(image) => orchestrator.turn(state, Some(&image), "").await,
                Err(e) => {
                    eprintln!("could not open image {path}: {e}");
                    continue;
                }
            }
        } else {
            orchestrator.turn(state, None, line).await
        };
        state = outcome.state;

        if !outcome.reply.is_empty() {
            println!("{}", outcome.reply);
        }
        for (index, entry) in outcome.gallery.iter().enumerate() {
            let title = entry.caption.lines().next().unwrap_or_default();
            println!("  [{index}] {} — {}", entry.image_path.display(), title);
        }
    }

    Ok(())
}
