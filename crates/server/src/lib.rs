//! Server crate for the infogen infographic generator.
//!
//! This crate contains the orchestrator that drives a submission through the
//! generation pipeline, plus the append-only prompt history.

pub mod history;
pub mod orchestrator;

pub use history::{HistoryEntry, HistoryStore};
pub use orchestrator::{GenerateError, InfographicOrchestrator};
