//! The SanitizePipeline chains multiple reply passes.
//!
//! This module provides the main SanitizePipeline struct that chains
//! multiple passes together using the builder pattern.

use crate::error::ReplyError;
use crate::traits::ReplyPass;
use tracing;

/// Chains multiple reply passes into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let sanitize = SanitizePipeline::new()
///     .add_pass(FenceStrip)
///     .add_pass(Trim)
///     .add_pass(NonEmpty);
///
/// let cleaned = sanitize.apply(reply)?;
/// ```
pub struct SanitizePipeline {
    passes: Vec<Box<dyn ReplyPass>>,
}

impl SanitizePipeline {
    /// Create a new empty SanitizePipeline.
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Add a pass to the pipeline (builder pattern).
    pub fn add_pass(mut self, pass: impl ReplyPass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Apply all passes in sequence to a reply.
    ///
    /// # Returns
    /// * `Ok(String)` - The sanitized reply after all passes
    /// * `Err(ReplyError)` - If any pass rejects the reply
    pub fn apply(&self, reply: String) -> Result<String, ReplyError> {
        let mut current = reply;
        for pass in &self.passes {
            tracing::debug!(
                "Applying pass: {} (input length: {})",
                pass.name(),
                current.len()
            );
            current = pass.apply(current)?;
            tracing::debug!(
                "Pass applied: {} (output length: {})",
                pass.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for SanitizePipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::{FenceStrip, NonEmpty, Trim};

    #[test]
    fn test_empty_pipeline_passes_reply_through() {
        let pipeline = SanitizePipeline::new();
        let reply = "  keep me exactly as I am  ".to_string();

        let out = pipeline.apply(reply.clone()).unwrap();
        assert_eq!(out, reply);
    }

    #[test]
    fn test_full_chain_cleans_fenced_reply() {
        let pipeline = SanitizePipeline::new()
            .add_pass(FenceStrip)
            .add_pass(Trim)
            .add_pass(NonEmpty);

        let reply = "```python\nprint(1)\n```\n".to_string();
        let out = pipeline.apply(reply).unwrap();
        assert_eq!(out, "print(1)");
    }

    #[test]
    fn test_chain_rejects_reply_that_sanitizes_to_nothing() {
        let pipeline = SanitizePipeline::new()
            .add_pass(FenceStrip)
            .add_pass(Trim)
            .add_pass(NonEmpty);

        let result = pipeline.apply("```python\n```".to_string());
        assert!(matches!(result, Err(ReplyError::Empty { .. })));
    }
}
