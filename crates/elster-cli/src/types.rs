//! Result types shared between commands and the summary printer.

use std::path::PathBuf;

/// Outcome of a table-rewriting command, for the closing summary.
pub struct TableReport {
    /// Input table path.
    pub input: PathBuf,
    /// Where the result was written, or `None` for a dry run.
    pub output: Option<PathBuf>,
    /// Metric rows, printed in order.
    pub rows: Vec<(&'static str, usize)>,
}

impl TableReport {
    pub fn new(input: PathBuf, output: Option<PathBuf>) -> Self {
        Self {
            input,
            output,
            rows: Vec::new(),
        }
    }

    /// Add a metric row.
    pub fn push(&mut self, label: &'static str, count: usize) {
        self.rows.push((label, count));
    }
}
