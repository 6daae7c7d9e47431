//! Error types for the renderer crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while rendering an artifact.
///
/// The variants keep the three failure families apart so callers can react
/// differently: `Launch`/`EngineFailed` are external-process failures,
/// `MissingOutput`/`Io` are filesystem failures.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The engine binary could not be started at all
    #[error("failed to launch render engine {binary}: {source}")]
    Launch {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine ran and exited non-zero; stderr is captured verbatim
    #[error("render engine exited with {code:?}: {stderr}")]
    EngineFailed { code: Option<i32>, stderr: String },

    /// The engine reported success but its conventional output path is empty
    #[error("render engine produced no output at {0}")]
    MissingOutput(PathBuf),

    /// Scene-file write or artifact relocation failed
    #[error("artifact I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
