use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use renderer::{RenderConfig, RenderEngine};
use server::{HistoryStore, InfographicOrchestrator};
use std::path::PathBuf;
use std::time::Instant;

/// Infogen - animated infographic generator
#[derive(Parser)]
#[command(name = "infogen")]
#[command(about = "Generates animated infographic videos from data prompts", long_about = None)]
struct Cli {
    /// Address of the prompt-model gateway
    #[arg(long, default_value = "http://localhost:50051")]
    llm_addr: String,

    /// Directory finished videos are served from
    #[arg(long, default_value = "static/videos")]
    output_dir: PathBuf,

    /// Rendering engine binary
    #[arg(long, default_value = "manim")]
    engine: PathBuf,

    /// Engine media cache root
    #[arg(long, default_value = "media")]
    media_root: PathBuf,

    /// Scratch directory for scene files
    #[arg(long, default_value = "scratch")]
    scratch_dir: PathBuf,

    /// Prompt history file
    #[arg(long, default_value = "prompt_history.jsonl")]
    history_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an infographic from a text prompt
    Prompt {
        /// The data to visualize, as free text
        text: String,
    },

    /// Generate an infographic from a data file
    Upload {
        /// Path of the data file
        file: PathBuf,
    },

    /// Show recently submitted prompts
    History {
        /// Number of entries to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Empty the scene-file scratch directory
    Clean,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let render_config = RenderConfig::default()
        .with_binary(cli.engine.clone())
        .with_media_root(cli.media_root.clone())
        .with_scratch_dir(cli.scratch_dir.clone());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Prompt { text } => {
            handle_generate(
                cli.llm_addr,
                render_config,
                cli.output_dir,
                Some((cli.history_file, text.clone())),
                text,
            )
            .await?
        }
        Commands::Upload { file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let text = String::from_utf8_lossy(&bytes).into_owned();
            handle_generate(cli.llm_addr, render_config, cli.output_dir, None, text).await?
        }
        Commands::History { limit } => handle_history(cli.history_file, limit)?,
        Commands::Clean => handle_clean(render_config)?,
    }

    Ok(())
}

/// Handle the 'prompt' and 'upload' commands
async fn handle_generate(
    llm_addr: String,
    render_config: RenderConfig,
    output_dir: PathBuf,
    record: Option<(PathBuf, String)>,
    input: String,
) -> Result<()> {
    // Submitted prompts go to the history log; uploads do not.
    if let Some((history_file, prompt)) = record {
        let history = HistoryStore::open(history_file);
        if let Err(e) = history.record(&prompt) {
            tracing::warn!("Could not record prompt history: {}", e);
        }
    }

    // Preflight: a missing engine binary fails late and cryptically otherwise
    let engine = RenderEngine::new(render_config.clone());
    if engine.locate().is_none() {
        println!(
            "{} rendering engine {} not found on PATH",
            "!".yellow(),
            render_config.binary.display()
        );
    }

    println!("Generating infographic...");
    let started = Instant::now();

    let orchestrator = InfographicOrchestrator::new(llm_addr, render_config, output_dir).await;
    let result = match orchestrator {
        Ok(orchestrator) => orchestrator.run(&input).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(path) => {
            println!(
                "{} Generated {} in {:?}",
                "✓".green(),
                path.display().to_string().bold(),
                started.elapsed()
            );
            Ok(())
        }
        Err(e) => {
            // Full detail goes to the log; the user gets one uniform line.
            tracing::error!("Generation failed: {}", e);
            println!("{} Something went wrong, try again later", "✗".red());
            std::process::exit(1);
        }
    }
}

/// Handle the 'history' command
fn handle_history(history_file: PathBuf, limit: usize) -> Result<()> {
    let history = HistoryStore::open(history_file);
    let entries = history.recent(limit).context("Failed to read history")?;

    if entries.is_empty() {
        println!("No prompts submitted yet.");
        return Ok(());
    }

    println!("{}", "Recent prompts:".bold().blue());
    for entry in entries {
        println!(
            "{}  {}",
            entry
                .submitted_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .cyan(),
            entry.prompt
        );
    }
    Ok(())
}

/// Handle the 'clean' command
fn handle_clean(render_config: RenderConfig) -> Result<()> {
    let scratch = render_config.scratch_dir.clone();
    let engine = RenderEngine::new(render_config);
    engine
        .clean_scratch()
        .context("Failed to clean scratch directory")?;
    println!("{} Emptied {}", "✓".green(), scratch.display());
    Ok(())
}
