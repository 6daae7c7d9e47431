//! # Generation Orchestrator
//!
//! This module drives one submission through the whole pipeline:
//! 1. Analyze the raw data with the language model
//! 2. Classify the analysis into a chart type
//! 3. Script the animation scenes
//! 4. Synthesize renderable scene code
//! 5. Render the code through the external engine and park the video
//!
//! The flow is strictly linear: Received → Analyzed → Classified → Scripted
//! → Synthesized → Rendered or Failed. There is no branching, no retry and
//! no cancellation; every stage blocks until its external call completes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{info, instrument, warn};

use llm_client::{LlmError, PromptClient};
use pipeline::passes::{FenceStrip, NonEmpty, Trim};
use pipeline::{
    prompts, Analysis, RenderableSource, ReplyError, SanitizePipeline, SceneScript, Submission,
    Visualization,
};
use renderer::{ArtifactStore, RenderConfig, RenderEngine, RenderError};

/// Everything that can sink a generation run, kept apart by origin so
/// callers can react differently: retry against the gateway, alert on the
/// engine, inspect the filesystem.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The submission had no visible characters
    #[error("submission is empty")]
    EmptySubmission,

    /// A language-model call failed or returned nothing usable at the
    /// transport level
    #[error("language model stage failed: {0}")]
    Upstream(#[from] LlmError),

    /// A reply sanitized down to nothing at a stage boundary
    #[error("unusable language model reply: {0}")]
    Reply(#[from] ReplyError),

    /// The render stage failed; see RenderError for the process/filesystem
    /// split
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Main orchestrator that drives the generation pipeline.
pub struct InfographicOrchestrator {
    llm: PromptClient,
    engine: RenderEngine,
    store: Arc<ArtifactStore>,
    /// Sanitizers for prose replies (analysis context, chart type)
    plain_sanitize: SanitizePipeline,
    /// Sanitizers for replies that may arrive fenced (scenes, scene code)
    code_sanitize: SanitizePipeline,
}

impl InfographicOrchestrator {
    /// Create a new orchestrator with all collaborators wired up.
    ///
    /// # Arguments
    /// * `llm_addr` - Address of the prompt-model gateway (e.g., "http://localhost:50051")
    /// * `render_config` - How to reach and drive the rendering engine
    /// * `serving_dir` - Directory finished videos are served from
    ///
    /// Note: this is an async function because connecting to the gateway
    /// requires await.
    pub async fn new(
        llm_addr: impl Into<String>,
        render_config: RenderConfig,
        serving_dir: impl Into<PathBuf>,
    ) -> Result<Self, GenerateError> {
        let llm = PromptClient::connect(llm_addr).await?;
        let store = Arc::new(ArtifactStore::open(serving_dir.into()).map_err(RenderError::from)?);
        let engine = RenderEngine::new(render_config);

        let plain_sanitize = SanitizePipeline::new().add_pass(Trim).add_pass(NonEmpty);
        let code_sanitize = SanitizePipeline::new()
            .add_pass(FenceStrip)
            .add_pass(Trim)
            .add_pass(NonEmpty);

        Ok(Self {
            llm,
            engine,
            store,
            plain_sanitize,
            code_sanitize,
        })
    }

    /// Main entry point: generate an infographic from free text.
    ///
    /// # Returns
    /// The serving path of the new artifact. The path always points at an
    /// existing file; every failure surfaces as a GenerateError instead.
    #[instrument(skip_all)]
    pub async fn run(&self, input: &str) -> Result<PathBuf, GenerateError> {
        let started = Instant::now();

        let submission = Submission::from_text(input).ok_or(GenerateError::EmptySubmission)?;

        let analysis = self.analyze(&submission).await?;
        let viz = self.classify(&analysis).await?;
        let scenes = self.script(&analysis).await?;
        let source = self.synthesize(&analysis, &scenes, &viz).await?;
        let artifact = self.render(&source).await?;

        info!(
            "Generated {} in {:.2?}",
            artifact.display(),
            started.elapsed()
        );
        Ok(artifact)
    }

    /// Generate an infographic from uploaded file bytes.
    ///
    /// Bytes are decoded lossily as UTF-8; an empty upload is rejected the
    /// same way an empty prompt is.
    pub async fn run_bytes(&self, bytes: &[u8]) -> Result<PathBuf, GenerateError> {
        let submission = Submission::from_bytes(bytes).ok_or(GenerateError::EmptySubmission)?;
        self.run(submission.text()).await
    }

    /// Stage 1: describe the data in free text.
    ///
    /// The reply is wrapped verbatim as the analysis context; no shape is
    /// imposed on it beyond the sanitizer chain.
    pub async fn analyze(&self, submission: &Submission) -> Result<Analysis, GenerateError> {
        let reply = self
            .llm
            .complete(prompts::analysis_prompt(submission.text()))
            .await?;
        let context = self.plain_sanitize.apply(reply)?;
        info!("Analyzed submission ({} chars of context)", context.len());
        Ok(Analysis::new(submission, context))
    }

    /// Stage 2: pick a chart type.
    ///
    /// The reply is used verbatim even when it falls outside the suggested
    /// menu; the parsed kind is a best-effort convenience.
    pub async fn classify(&self, analysis: &Analysis) -> Result<Visualization, GenerateError> {
        let reply = self
            .llm
            .complete(prompts::classify_prompt(analysis.context()))
            .await?;
        let reply = self.plain_sanitize.apply(reply)?;
        let viz = Visualization::from_reply(reply);
        match viz.kind() {
            Some(kind) => info!("Recommended chart type: {}", kind.menu_label()),
            None => warn!(
                "Chart recommendation {:?} is off the menu; using it verbatim",
                viz.raw()
            ),
        }
        Ok(viz)
    }

    /// Stage 3: script the animation scenes.
    pub async fn script(&self, analysis: &Analysis) -> Result<SceneScript, GenerateError> {
        let reply = self
            .llm
            .complete(prompts::scene_prompt(analysis.context()))
            .await?;
        let text = self.code_sanitize.apply(reply)?;
        info!("Scripted scenes ({} lines)", text.lines().count());
        Ok(SceneScript::new(text))
    }

    /// Stage 4: synthesize renderable scene code from everything so far.
    ///
    /// Fences are stripped; the reserved `$` character is not re-validated
    /// here (the prompt forbids it, and behavior past that is the engine's
    /// problem by contract), but its presence is worth a log line.
    pub async fn synthesize(
        &self,
        analysis: &Analysis,
        scenes: &SceneScript,
        viz: &Visualization,
    ) -> Result<RenderableSource, GenerateError> {
        let reply = self
            .llm
            .complete(prompts::synthesis_prompt(
                analysis.context(),
                scenes.as_str(),
                viz.raw(),
            ))
            .await?;
        let code = self.code_sanitize.apply(reply)?;
        if code.contains('$') {
            warn!("Synthesized source still contains '$' after sanitizing");
        }
        info!("Synthesized scene code ({} bytes)", code.len());
        Ok(RenderableSource::new(code))
    }

    /// Stage 5: render the code and park the video in the serving directory.
    pub async fn render(&self, source: &RenderableSource) -> Result<PathBuf, GenerateError> {
        let id = self.store.next_id();
        let path = self.engine.render(source.as_str(), id, &self.store).await?;
        Ok(path)
    }

    /// The artifact store this orchestrator parks videos in.
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }
}
