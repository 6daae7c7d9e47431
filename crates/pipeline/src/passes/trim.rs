//! Pass that trims surrounding whitespace from a reply.

use crate::error::ReplyError;
use crate::traits::ReplyPass;

/// Drops leading and trailing whitespace. Models routinely pad replies with
/// blank lines, which would otherwise end up in scene files verbatim.
pub struct Trim;

impl ReplyPass for Trim {
    fn name(&self) -> &str {
        "Trim"
    }

    fn apply(&self, reply: String) -> Result<String, ReplyError> {
        Ok(reply.trim().to_string())
    }
}
