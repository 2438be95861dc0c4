use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ambilight::models::AppConfig;
use ambilight::services::{Encoding, FileImageSource, FramePipeline, UdpSink, WireEncoder};
use ambilight::Runner;
use zone_color::{SmoothingState, ZoneImage};

#[derive(Parser)]
#[command(name = "ambilight")]
#[command(about = "Ambilight - six-zone screen color sampler for networked ambient lighting")]
struct Cli {
    /// Path to config.yaml
    #[arg(short, long, global = true, env = "AMBILIGHT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample the capture file and send colors until Ctrl-C
    Run {
        /// UDP target as host:port (overrides config)
        #[arg(short, long, env = "AMBILIGHT_TARGET")]
        target: Option<String>,

        /// Image file to sample (overrides config)
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Process one image and print the encoded payload
    Once {
        /// Image file to sample
        #[arg(short, long)]
        image: PathBuf,

        /// Wire format (overrides config)
        #[arg(short, long, value_enum)]
        encoding: Option<Encoding>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { target, image }) => {
            run_loop(cli.config.as_deref(), target, image).await
        }
        Some(Commands::Once { image, encoding }) => {
            run_once(cli.config.as_deref(), &image, encoding).await
        }
        None => run_status_command(cli.config.as_deref()),
    }
}

/// Periodic sample-and-send loop
async fn run_loop(
    config_path: Option<&Path>,
    target: Option<String>,
    image: Option<PathBuf>,
) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ambilight=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = AppConfig::load_or_default(config_path)?;
    if let Some(target) = target {
        config.target = target;
    }
    if let Some(image) = image {
        config.image_path = image;
    }
    config.validate()?;

    let sink = Arc::new(UdpSink::connect(&config.target).await?);
    let mut runner = Runner::new(&config, sink)?;

    let summary = runner
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            }
            tracing::info!("Shutdown requested");
        })
        .await;

    println!(
        "Processed {} ticks ({} sent, {} skipped)",
        summary.ticks(),
        summary.sent,
        summary.skipped
    );
    Ok(())
}

/// Process a single image file without any network I/O
async fn run_once(
    config_path: Option<&Path>,
    image: &Path,
    encoding: Option<Encoding>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ambilight=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load_or_default(config_path)?;
    let frame = FileImageSource::new(image)
        .load()?
        .ok_or_else(|| anyhow::anyhow!("Image not found: {}", image.display()))?;
    let bounds = frame.bounds();

    let pipeline = FramePipeline::new(config.pipeline_settings()?);
    let (payload, _) = pipeline.run(Arc::new(frame), &SmoothingState::new()).await?;

    let encoder = WireEncoder::new(encoding.unwrap_or(config.encoding));
    let bytes = encoder.encode(&payload)?;

    tracing::info!(bounds = %bounds, bytes = bytes.len(), "Processed image");
    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}

/// Show version, config source and effective settings
fn run_status_command(config_path: Option<&Path>) -> anyhow::Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let target_env = std::env::var("AMBILIGHT_TARGET").ok();

    println!("Ambilight v{VERSION}");
    println!("Six-zone screen color sampler\n");

    println!("Environment Variables:");
    println!(
        "  AMBILIGHT_CONFIG = {}",
        config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!(
        "  AMBILIGHT_TARGET = {}",
        target_env.as_deref().unwrap_or("(not set)")
    );

    let source = match config_path {
        Some(path) if path.exists() => path.display().to_string(),
        Some(path) => format!("{} (file not found)", path.display()),
        None => "built-in defaults".to_string(),
    };
    println!("\nConfig:   {source}");

    let config = match config_path {
        Some(path) if path.exists() => AppConfig::load(path)?,
        _ => AppConfig::default(),
    };

    let ignored = if config.ignored_zones.is_empty() {
        "none".to_string()
    } else {
        config
            .ignored_zones
            .iter()
            .map(|z| z.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let area = config
        .sampling_area
        .map(|a| a.to_string())
        .unwrap_or_else(|| "whole image".to_string());

    println!("\nSettings:");
    println!("  Policy:      {}", config.extraction_policy);
    println!("  Encoding:    {}", config.encoding);
    println!("  Threshold:   {}", config.smoothing_threshold);
    println!("  Edge bands:  {}%", config.edge_percent);
    println!("  Sampling:    {area}");
    println!("  Ignored:     {ignored}");
    println!("  Placeholder: {}", config.placeholder_color);
    println!("  Fallback:    {}", config.fallback_color);
    println!("  Image:       {}", config.image_path.display());
    println!(
        "  Target:      {}",
        target_env.as_deref().unwrap_or(&config.target)
    );
    println!("  Interval:    {} ms", config.interval_ms);

    println!("\nRun 'ambilight --help' for available commands.");
    Ok(())
}
