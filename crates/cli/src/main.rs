use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use futures::stream::{self, StreamExt};
use pipeline::FilterPipeline;
use sentiment_client::SentimentClient;
use server::{
    BlobStore, LiveOrchestrator, LocalBlobStore, PipelineConfig, PipelineOutcome, StorageEvent,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use vision::{Detector, DetectorClient};

/// Fridge Chef - recipes from a photo of your fridge
#[derive(Parser)]
#[command(name = "fridge-chef")]
#[command(about = "Detect ingredients in a photo and rank matching recipes", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Settings {
    /// Base URL of the object detector
    #[arg(long, env = "DETECTOR_URL", default_value = "http://localhost:8000", global = true)]
    detector_url: String,

    /// API key for the recipe service
    #[arg(long, env = "RECIPE_API_KEY", global = true, hide_env_values = true)]
    recipe_api_key: Option<String>,

    /// Base URL of the recipe service
    #[arg(long, env = "RECIPE_BASE_URL", default_value = recipes::DEFAULT_BASE_URL, global = true)]
    recipe_base_url: String,

    /// Address of the sentiment gRPC service
    #[arg(long, env = "SENTIMENT_URL", default_value = server::config::DEFAULT_SENTIMENT_ENDPOINT, global = true)]
    sentiment_url: String,

    /// Directory holding one sub-directory per bucket
    #[arg(long, env = "STORAGE_ROOT", default_value = "data", global = true)]
    storage_root: PathBuf,

    /// Detections must score strictly above this
    #[arg(long, env = "MIN_CONFIDENCE", default_value = "0.30", global = true)]
    min_confidence: f64,

    /// Comma-separated labels that are never ingredients
    #[arg(long, env = "NON_FOOD", value_delimiter = ',', global = true)]
    non_food: Vec<String>,

    /// Recipes requested per run
    #[arg(long, env = "MAX_RECIPES", default_value = "5", global = true)]
    max_recipes: usize,

    /// Per-recipe calls in flight
    #[arg(long, env = "FAN_OUT", default_value = "1", global = true)]
    fan_out: usize,

    /// Timeout for every outbound call, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30", global = true)]
    timeout_secs: u64,
}

impl Settings {
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn non_food(&self) -> Vec<String> {
        let labels: Vec<String> = self
            .non_food
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if labels.is_empty() {
            pipeline::filters::DEFAULT_NON_FOOD
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            labels
        }
    }

    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let api_key = self
            .recipe_api_key
            .clone()
            .context("A recipe API key is required (--recipe-api-key or RECIPE_API_KEY)")?;

        let config = PipelineConfig::new(&self.detector_url, api_key)
            .with_recipe_base_url(&self.recipe_base_url)
            .with_sentiment_endpoint(&self.sentiment_url)
            .with_min_confidence(self.min_confidence)
            .with_non_food(self.non_food())
            .with_max_recipes(self.max_recipes)
            .with_fan_out(self.fan_out)
            .with_request_timeout(self.timeout());
        config.validate()?;
        Ok(config)
    }

    fn store(&self) -> LocalBlobStore {
        LocalBlobStore::new(&self.storage_root)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline for one image and write its report
    Process {
        /// Bucket (sub-directory of the storage root)
        #[arg(long)]
        bucket: String,

        /// Object name of the image
        #[arg(long)]
        name: String,
    },

    /// Run the pipeline for several images in one bucket
    Batch {
        #[arg(long)]
        bucket: String,

        /// Object names of the images
        #[arg(required = true)]
        names: Vec<String>,

        /// Number of images processed concurrently
        #[arg(long, default_value = "4")]
        concurrent: usize,
    },

    /// Show what the detector sees and which labels survive filtering
    Detect {
        #[arg(long)]
        bucket: String,

        #[arg(long)]
        name: String,
    },

    /// Check that the detector and sentiment service are reachable
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Process { bucket, name } => handle_process(&cli.settings, bucket, name).await?,
        Commands::Batch {
            bucket,
            names,
            concurrent,
        } => handle_batch(&cli.settings, bucket, names, concurrent).await?,
        Commands::Detect { bucket, name } => handle_detect(&cli.settings, bucket, name).await?,
        Commands::Health => handle_health(&cli.settings).await?,
    }

    Ok(())
}

/// Handle the 'process' command
async fn handle_process(settings: &Settings, bucket: String, name: String) -> Result<()> {
    let config = settings.pipeline_config()?;
    let results_prefix = config.results_prefix.clone();
    let orchestrator = LiveOrchestrator::connect(config, settings.store()).await?;

    let event = StorageEvent::new(bucket, name);
    let start = Instant::now();
    match orchestrator.handle_event(&event).await? {
        Some(outcome) => {
            print_outcome(&outcome);
            println!(
                "{} Wrote {}/{} in {:?}",
                "✓".green(),
                event.bucket,
                event.result_path(&results_prefix),
                start.elapsed()
            );
        }
        None => println!(
            "{} {} is a pipeline result; nothing to do",
            "•".yellow(),
            event.name
        ),
    }
    Ok(())
}

/// Handle the 'batch' command
async fn handle_batch(
    settings: &Settings,
    bucket: String,
    names: Vec<String>,
    concurrent: usize,
) -> Result<()> {
    let config = settings.pipeline_config()?;
    let orchestrator = Arc::new(LiveOrchestrator::connect(config, settings.store()).await?);

    let total_start = Instant::now();
    let results: Vec<(String, Result<Option<PipelineOutcome>>, Duration)> = stream::iter(names)
        .map(|name| {
            let orchestrator = orchestrator.clone();
            let event = StorageEvent::new(bucket.clone(), name);
            async move {
                let start = Instant::now();
                let result = orchestrator.handle_event(&event).await;
                (event.name, result, start.elapsed())
            }
        })
        .buffer_unordered(concurrent.max(1))
        .collect()
        .await;
    let total_time = total_start.elapsed();

    let mut timings = vec![];
    let mut failures = 0;
    for (name, result, elapsed) in &results {
        match result {
            Ok(Some(outcome)) => {
                timings.push(*elapsed);
                println!("{} {} [{}] {:?}", "✓".green(), name, outcome.state(), elapsed);
            }
            Ok(None) => println!("{} {} skipped", "•".yellow(), name),
            Err(e) => {
                failures += 1;
                println!("{} {}: {:#}", "✗".red(), name, e);
            }
        }
    }

    println!("{}", "Batch results:".bold().blue());
    println!("Images: {} ({} failed)", results.len(), failures);
    println!("Total time: {:?}", total_time);
    if !timings.is_empty() {
        timings.sort();
        let avg: Duration = timings.iter().sum::<Duration>() / timings.len() as u32;
        println!("Average latency: {:?}", avg);
        println!("P50 latency: {:?}", timings[timings.len() / 2]);
        println!(
            "P95 latency: {:?}",
            timings[((timings.len() as f32 * 0.95) as usize).min(timings.len() - 1)]
        );
    }
    Ok(())
}

/// Handle the 'detect' command
async fn handle_detect(settings: &Settings, bucket: String, name: String) -> Result<()> {
    let store = settings.store();
    let detector = DetectorClient::new(&settings.detector_url, settings.timeout())?;
    let event = StorageEvent::new(bucket, name);

    let image = store
        .download(&event.bucket, &event.name)
        .await
        .with_context(|| format!("Failed to read {}/{}", event.bucket, event.name))?;
    let detections = detector.detect(image, event.file_name()).await?;

    println!("{}", format!("Detections in {}:", event.name).bold().blue());
    for detection in &detections {
        println!("  - {} ({:.2})", detection.class_name, detection.confidence);
    }

    let filter = FilterPipeline::edible(settings.min_confidence, settings.non_food());
    let ingredients = filter.ingredients(detections);
    println!("{} {}", "Ingredients:".bold(), ingredients);
    Ok(())
}

/// Handle the 'health' command
async fn handle_health(settings: &Settings) -> Result<()> {
    let detector = DetectorClient::new(&settings.detector_url, settings.timeout())?;
    let mut healthy = true;

    match detector.healthcheck().await {
        Ok(status) => println!("{} detector: {}", "✓".green(), status.status),
        Err(e) => {
            healthy = false;
            println!("{} detector: {}", "✗".red(), e);
        }
    }

    match SentimentClient::connect(&settings.sentiment_url, settings.timeout()).await {
        Ok(client) => match client.analyze("health check").await {
            Ok(_) => println!("{} sentiment: ok", "✓".green()),
            Err(e) => {
                healthy = false;
                println!("{} sentiment: {}", "✗".red(), e);
            }
        },
        Err(e) => {
            healthy = false;
            println!("{} sentiment: {}", "✗".red(), e);
        }
    }

    if !healthy {
        anyhow::bail!("one or more services are unavailable");
    }
    Ok(())
}

/// Print a report the way it is written to storage
fn print_outcome(outcome: &PipelineOutcome) {
    match outcome {
        PipelineOutcome::Ranked { ingredients, report } => {
            println!("{} {}", "Ingredients:".bold(), ingredients);
            println!("{}", "Recipes:".bold().blue());
            for (rank, line) in report.lines().iter().enumerate() {
                println!("{}. {}", (rank + 1).to_string().green(), line);
            }
        }
        other => println!("{}", other.report_text().yellow()),
    }
}
