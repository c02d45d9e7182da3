//! Storage trigger worker.
//!
//! Reads one JSON storage event per line from stdin
//! (`{"bucket": "...", "name": "..."}`) and runs the pipeline for each.
//! A failed event is logged and the worker moves on to the next line.
//!
//! Storage backend:
//! - `S3_ENDPOINT` set: S3-compatible store with `S3_ACCESS_KEY`,
//!   `S3_SECRET_KEY` and `S3_REGION`
//! - `STORAGE_BACKEND=s3`: AWS with the default credential chain
//! - otherwise: local directory at `STORAGE_ROOT` (default `data`)

use std::env;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use server::{
    BlobStore, LiveOrchestrator, LocalBlobStore, ObjectStorageConfig, PipelineConfig,
    S3BlobStore, StorageEvent,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,server=debug,recipes=debug,pipeline=debug")
            }),
        )
        .init();

    info!("Starting fridge-chef worker");

    let config = PipelineConfig::from_env().context("Failed to load configuration")?;

    if let Ok(endpoint) = env::var("S3_ENDPOINT") {
        let store = S3BlobStore::new(ObjectStorageConfig {
            endpoint,
            region: env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            access_key: env::var("S3_ACCESS_KEY").context("S3_ACCESS_KEY must be set")?,
            secret_key: env::var("S3_SECRET_KEY").context("S3_SECRET_KEY must be set")?,
        });
        serve(config, store).await
    } else if env::var("STORAGE_BACKEND").is_ok_and(|b| b.eq_ignore_ascii_case("s3")) {
        serve(config, S3BlobStore::from_env().await).await
    } else {
        let root = env::var("STORAGE_ROOT").unwrap_or_else(|_| "data".to_string());
        info!("Using local storage at {}", root);
        serve(config, LocalBlobStore::new(root)).await
    }
}

async fn serve<B: BlobStore>(config: PipelineConfig, store: B) -> Result<()> {
    info!("Connecting to collaborators...");
    let orchestrator = LiveOrchestrator::connect(config, store).await?;
    info!("Ready; reading events from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut processed = 0usize;
    let mut failed = 0usize;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: StorageEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                warn!("Skipping malformed event {:?}: {}", line, e);
                continue;
            }
        };

        match orchestrator.handle_event(&event).await {
            Ok(Some(outcome)) => {
                processed += 1;
                info!("{}/{} -> {}", event.bucket, event.name, outcome.state());
            }
            Ok(None) => {}
            Err(e) => {
                failed += 1;
                error!("Event {}/{} failed: {:#}", event.bucket, event.name, e);
            }
        }
    }

    info!("Input closed: {} processed, {} failed", processed, failed);
    Ok(())
}
