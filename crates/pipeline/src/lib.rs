//! Stage contracts for the infographic generation pipeline.
//!
//! This crate provides:
//! - The data types handed between pipeline stages (submission, analysis,
//!   visualization choice, scene script, renderable source)
//! - The fixed prompt templates each stage sends to the language model
//! - ReplyPass trait and implementations for sanitizing model replies
//! - SanitizePipeline for composing passes
//!
//! ## Architecture
//! Stage output is free text from the language model. Before a reply is
//! wrapped in its typed form and handed to the next stage, it runs through a
//! small chain of sanitizer passes:
//! 1. Fence stripping removes markdown code-block markers
//! 2. Trimming drops surrounding whitespace
//! 3. Non-empty validation rejects replies with nothing left
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::passes::{FenceStrip, NonEmpty, Trim};
//! use pipeline::SanitizePipeline;
//!
//! let sanitize = SanitizePipeline::new()
//!     .add_pass(FenceStrip)
//!     .add_pass(Trim)
//!     .add_pass(NonEmpty);
//!
//! let code = sanitize.apply(reply)?;
//! ```

pub mod error;
pub mod passes;
pub mod prompts;
pub mod sanitize_pipeline;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::ReplyError;
pub use sanitize_pipeline::SanitizePipeline;
pub use traits::ReplyPass;
pub use types::{Analysis, ChartKind, RenderableSource, SceneScript, Submission, Visualization};
