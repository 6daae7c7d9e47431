//! Core trait for the reply-sanitizing pipeline.
//!
//! This module defines the ReplyPass trait that allows composable passes to
//! be applied to language-model replies before they cross a stage boundary.

use crate::error::ReplyError;

/// Core trait for sanitizing one model reply.
///
/// All passes must implement this trait to be used in the SanitizePipeline.
///
/// ## Design Note
/// - `Send + Sync` allows passes to be used in concurrent contexts
/// - Passes take ownership of the reply String and return a new one
/// - A pass may transform the text (fence stripping, trimming) or validate
///   it and pass it through unchanged
pub trait ReplyPass: Send + Sync {
    /// Returns the name of this pass (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this pass to a reply.
    ///
    /// # Returns
    /// * `Ok(String)` - The (possibly rewritten) reply
    /// * `Err(ReplyError)` - If the reply is unusable
    fn apply(&self, reply: String) -> Result<String, ReplyError>;
}
