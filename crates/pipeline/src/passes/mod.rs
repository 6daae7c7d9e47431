//! Sanitizer pass implementations.
//!
//! Each pass is a small, single-purpose transformation or validation of a
//! language-model reply. Passes compose through the SanitizePipeline.

pub mod fence_strip;
pub mod non_empty;
pub mod trim;

pub use fence_strip::{strip_code_fences, FenceStrip};
pub use non_empty::NonEmpty;
pub use trim::Trim;
