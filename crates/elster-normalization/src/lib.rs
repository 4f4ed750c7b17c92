//! Deterministic friendly-name generation for Elster signal names.
//!
//! Two pure functions make up the public surface:
//!
//! - [`expand_signal_name`]: recursive longest-match segmentation of a raw
//!   identifier into a space-separated, title-cased German label.
//! - [`refine_friendly_name`]: a fixed pipeline of repair passes over an
//!   existing label, validated against the original signal name.
//!
//! Both are total functions over their input domain: degenerate inputs
//! (empty strings, unknown tokens, already-clean labels) fall through to
//! identity-like behavior instead of failing. Neither touches any global
//! state, so callers may fan out over signals freely.
//!
//! ```
//! use elster_model::AbbreviationTable;
//! use elster_normalization::{expand_signal_name, refine_friendly_name};
//!
//! let table = AbbreviationTable::builtin();
//! let label = expand_signal_name(&table, "WPVORLAUFIST");
//! assert_eq!(label, "Wärmepumpe Vorlauf Ist");
//! assert_eq!(refine_friendly_name("WPVORLAUFIST", &label), label);
//! ```

mod refine;
mod segment;

pub use refine::refine_friendly_name;
pub use segment::expand_signal_name;
