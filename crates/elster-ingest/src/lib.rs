//! Reading and rewriting the Elster register table source file.
//!
//! The table is a struct-literal array inside a C header, maintained by
//! hand. This crate treats it strictly as lines: entries are parsed into
//! [`elster_model::TableEntry`] values, every other line survives byte for
//! byte, and malformed entry lines are preserved rather than rejected.
//!
//! The rewriters take the name transform as a function argument, so the
//! crate only ever sees `(signal_name, label)` pairs and stays independent
//! of the normalization logic.

mod format;
mod migrate;
mod rewrite;
mod scan;

pub use format::align_columns;
pub use migrate::{MigrateStats, migrate_entries};
pub use rewrite::{RewriteStats, annotate_with, refine_with};
pub use scan::{TableDocument, TableLine, parse_entry_line};
