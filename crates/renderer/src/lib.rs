//! Driving the external animation-rendering engine.
//!
//! This crate owns the last pipeline stage: writing synthesized scene code
//! to disk, invoking the rendering engine as a subprocess, and relocating
//! the video it produces into the serving directory.
//!
//! ## Components
//!
//! ### RenderEngine
//! Builds the engine command line, runs it, captures diagnostics, and maps
//! the three ways a render can fail (engine exit, missing output, I/O) onto
//! distinct error variants.
//!
//! ### ArtifactStore
//! Owns the serving directory and the atomically incremented counter that
//! names artifacts. Naming never consults the directory listing, so two
//! in-flight renders cannot compute the same filename.

pub mod artifacts;
pub mod engine;
pub mod error;

// Re-export commonly used types
pub use artifacts::ArtifactStore;
pub use engine::{RenderConfig, RenderEngine};
pub use error::RenderError;
