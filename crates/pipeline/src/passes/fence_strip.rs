//! Pass that removes markdown code-fence markers from a reply.
//!
//! The synthesis prompt forbids markdown, but models add fences anyway.
//! Downstream the reply is written to a scene file and executed, so every
//! fence marker has to go, not just the outermost pair.

use crate::error::ReplyError;
use crate::traits::ReplyPass;

/// Remove all occurrences of markdown code-fence markers.
///
/// The language-tagged marker is removed before the bare one so it never
/// leaves a dangling language tag behind. Idempotent: a second application
/// finds nothing to remove.
pub fn strip_code_fences(reply: &str) -> String {
    reply.replace("```python", "").replace("```", "")
}

/// Strips markdown code fences wherever they appear in the reply.
pub struct FenceStrip;

impl ReplyPass for FenceStrip {
    fn name(&self) -> &str {
        "FenceStrip"
    }

    fn apply(&self, reply: String) -> Result<String, ReplyError> {
        Ok(strip_code_fences(&reply))
    }
}
