//! Error types for the pipeline crate.

use thiserror::Error;

/// Errors raised by sanitizer passes when a model reply is unusable.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReplyError {
    /// Nothing was left of the reply once sanitizing finished
    #[error("reply from {pass} was empty")]
    Empty { pass: String },
}
