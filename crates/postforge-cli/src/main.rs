mod bundle;
mod inputs;
mod pipeline;
mod run_log;

use std::path::PathBuf;

use clap::Parser;
use postforge_providers::{ImageProvider, ImageStyle, TextProvider};
use tracing_subscriber::EnvFilter;

use crate::pipeline::RunOptions;
use crate::run_log::RunLog;

/// Instagram image post generator: turns inspiration posts or a bare
/// topic into ready-to-publish caption + image bundles.
#[derive(Debug, Parser)]
#[command(name = "postforge")]
#[command(about = "Generate brand Instagram post bundles from inspiration content")]
struct Cli {
    /// Instagram post URLs for inspiration
    #[arg(long, num_args = 1..)]
    links: Vec<String>,

    /// Path to a text file with one Instagram URL per line
    #[arg(long)]
    links_file: Option<PathBuf>,

    /// Paths to local inspiration images
    #[arg(long, num_args = 1..)]
    images: Vec<PathBuf>,

    /// Topic for generating content from scratch (no inspiration needed)
    #[arg(long)]
    topic: Option<String>,

    /// Image generation style
    #[arg(long, value_enum, default_value_t = ImageStyle::Lifestyle)]
    style: ImageStyle,

    /// Number of caption/image variants per inspiration
    #[arg(long, default_value_t = 2)]
    variants: u32,

    /// Image generation provider
    #[arg(long, value_enum, default_value_t = ImageProvider::Google)]
    image_provider: ImageProvider,

    /// Text/analysis provider
    #[arg(long, value_enum, default_value_t = TextProvider::Claude)]
    text_provider: TextProvider,

    /// Run with deterministic mock providers (no API calls)
    #[arg(long)]
    mock: bool,

    /// Skip scraping of --links inputs
    #[arg(long)]
    skip_scrape: bool,

    /// Skip image generation; captions only
    #[arg(long)]
    skip_images: bool,

    /// Skip the quality review step
    #[arg(long)]
    skip_review: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = postforge_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let run_dir = config.run_root.join(format!("run_{timestamp}"));
    std::fs::create_dir_all(&run_dir)?;

    println!(
        "postforge{} — output: {}",
        if cli.mock { " [mock]" } else { "" },
        run_dir.display()
    );

    let options = RunOptions {
        links: cli.links,
        links_file: cli.links_file,
        images: cli.images,
        topic: cli.topic,
        style: cli.style,
        variants: cli.variants,
        image_provider: cli.image_provider,
        text_provider: cli.text_provider,
        mock: cli.mock,
        skip_scrape: cli.skip_scrape,
        skip_images: cli.skip_images,
        skip_review: cli.skip_review,
    };

    let mut run_log = RunLog::new();
    let outcome = tokio::select! {
        result = pipeline::run(&options, &config, &run_dir, &mut run_log) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(Ok(summary)) => {
            let log_path = run_log.save(&run_dir)?;
            println!(
                "\ndone — {} posts generated\noutput: {}\nrun log: {}",
                summary.posts_generated,
                run_dir.display(),
                log_path.display()
            );
            Ok(())
        }
        Some(Err(e)) => {
            tracing::error!(error = %e, "pipeline failed");
            run_log.log_error("pipeline", &format!("{e:#}"));
            let log_path = run_log.save(&run_dir)?;
            eprintln!("run failed: {e:#}\nsee {} for details", log_path.display());
            std::process::exit(1);
        }
        None => {
            tracing::error!("interrupted by user");
            run_log.log_error("pipeline", "interrupted by user");
            let log_path = run_log.save(&run_dir)?;
            eprintln!("interrupted — partial output in {}", log_path.display());
            std::process::exit(1);
        }
    }
}
