//! AI-assisted refinement of generated friendly names.
//!
//! The deterministic pipeline occasionally leaves awkward labels behind
//! (odd splits, fragments the merge passes could not prove safe). This
//! crate submits those labels to a chat model in numbered batches and maps
//! the answers back to per-entry suggestions. Every failure mode degrades
//! to "keep the current label".

mod client;
mod error;
mod prompt;

pub use client::{DEFAULT_BATCH_SIZE, RefinementClient};
pub use error::{AiError, Result};
pub use prompt::{BatchItem, SYSTEM_PROMPT, Suggestion, build_batch_prompt, parse_batch_response};
