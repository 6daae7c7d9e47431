//! Pass that rejects replies with no usable content.
//!
//! This is typically the last pass in a chain: a reply consisting only of
//! fences and whitespace sanitizes down to nothing, and nothing is not a
//! scene script or a program.

use crate::error::ReplyError;
use crate::traits::ReplyPass;

/// Rejects a reply whose trimmed form is empty.
pub struct NonEmpty;

impl ReplyPass for NonEmpty {
    fn name(&self) -> &str {
        "NonEmpty"
    }

    fn apply(&self, reply: String) -> Result<String, ReplyError> {
        if reply.trim().is_empty() {
            return Err(ReplyError::Empty {
                pass: self.name().to_string(),
            });
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_reply_passes() {
        let out = NonEmpty.apply("Bar Graph".to_string()).unwrap();
        assert_eq!(out, "Bar Graph");
    }

    #[test]
    fn test_blank_reply_is_rejected() {
        let result = NonEmpty.apply("  \n\t ".to_string());
        assert!(matches!(result, Err(ReplyError::Empty { .. })));
    }
}
