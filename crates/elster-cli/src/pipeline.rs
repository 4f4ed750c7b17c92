//! Wiring between the table document and the naming passes.
//!
//! The ingest crate rewrites entries through caller-supplied closures; this
//! module plugs the deterministic naming functions (and the AI suggestion
//! flow) into those closures so the commands stay thin.

use std::collections::BTreeMap;

use tracing::debug;

use elster_ai::{BatchItem, Suggestion};
use elster_ingest::{RewriteStats, TableDocument, annotate_with, refine_with};
use elster_model::AbbreviationTable;
use elster_normalization::{expand_signal_name, refine_friendly_name};

/// Expand every eligible signal name into a friendly name.
pub fn annotate_document(doc: &mut TableDocument) -> RewriteStats {
    let table = AbbreviationTable::builtin();
    annotate_with(doc, |signal| expand_signal_name(&table, signal))
}

/// Run the deterministic refinement passes over existing friendly names.
pub fn refine_document(doc: &mut TableDocument) -> RewriteStats {
    refine_with(doc, refine_friendly_name)
}

/// Collect the entries eligible for AI review: those that already carry a
/// friendly name and are not blacklisted.
pub fn pending_ai_items(doc: &TableDocument) -> Vec<BatchItem> {
    doc.entries()
        .filter(|entry| !entry.is_blacklisted())
        .filter_map(|entry| {
            entry.friendly_name().map(|label| BatchItem {
                signal_name: entry.signal_name.clone(),
                current_label: label.to_string(),
            })
        })
        .collect()
}

/// Write accepted AI suggestions back into the document.
///
/// Suggestions are matched to entries by signal name, so partial batches
/// and reordered responses apply cleanly. Returns the number of entries
/// changed.
pub fn apply_ai_suggestions(
    doc: &mut TableDocument,
    items: &[BatchItem],
    suggestions: &[Suggestion],
) -> usize {
    let accepted: BTreeMap<&str, &str> = items
        .iter()
        .zip(suggestions)
        .filter(|(item, suggestion)| {
            suggestion.changed && suggestion.label != item.current_label
        })
        .map(|(item, suggestion)| (item.signal_name.as_str(), suggestion.label.as_str()))
        .collect();

    let mut changed = 0;
    for entry in doc.entries_mut() {
        if let Some(label) = accepted.get(entry.signal_name.as_str()) {
            entry.set_friendly_name(label);
            changed += 1;
        }
    }
    debug!(changed, "applied AI suggestions");
    changed
}
