//! Simple test harness for the generation orchestrator.
//!
//! This binary runs one submission end to end. It expects the prompt-model
//! gateway on localhost:50051 and the rendering engine on $PATH.

use anyhow::Result;
use tracing::info;

use renderer::RenderConfig;
use server::InfographicOrchestrator;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,pipeline=debug,renderer=debug")
        .init();

    info!("Starting infogen server test harness");

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Electronics: 40%, Clothing: 30%, Groceries: 30%".to_string());

    info!("Connecting to prompt model...");
    let orchestrator = InfographicOrchestrator::new(
        "http://localhost:50051",
        RenderConfig::default(),
        "static/videos",
    )
    .await?;
    info!("Connected to prompt model");

    info!("Generating infographic for: {}", prompt);
    let artifact = orchestrator.run(&prompt).await?;
    info!("Artifact ready at {}", artifact.display());

    Ok(())
}
