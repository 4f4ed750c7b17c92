//! Data model for the Elster signal naming toolkit.
//!
//! This crate holds the shared, I/O-free definitions:
//! - the ordered abbreviation dictionary the segmenter matches against,
//! - curated per-signal display metadata and the signal blacklist,
//! - the parsed table entry model,
//! - the shared error type.

mod abbrev;
mod entry;
mod error;
mod metadata;

pub use abbrev::{AbbreviationEntry, AbbreviationTable};
pub use entry::{TableEntry, strip_quotes};
pub use error::{ElsterError, Result};
pub use metadata::{MetadataRegistry, SignalMetadata};
