//! Rewriting friendly-name fields inside a parsed table document.
//!
//! The rewriters are generic over the actual transform: the caller passes a
//! function from signal name (and current label) to new label, keeping this
//! crate free of normalization logic. Blacklisted entries and entries whose
//! expansion would just repeat the signal name are skipped.

use tracing::{debug, trace};

use elster_model::TableEntry;

use crate::scan::TableDocument;

/// Counters for one rewrite run, reported in the CLI summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Entries seen in the table.
    pub total: usize,
    /// Entries whose friendly name was written or changed.
    pub updated: usize,
    /// Entries already carrying the produced name.
    pub unchanged: usize,
    /// Blacklisted entries left untouched.
    pub skipped_blacklisted: usize,
    /// Entries where the produced name equals the signal name.
    pub skipped_same: usize,
    /// Entries without a rewritable friendly-name field.
    pub skipped_missing: usize,
}

/// Write expanded friendly names into every eligible entry.
///
/// `expand` maps a signal name to its friendly label. Entries are skipped
/// when blacklisted, when the label case-insensitively equals the signal
/// name (no information gained), or when the entry is too short to carry a
/// friendly-name field.
pub fn annotate_with(doc: &mut TableDocument, expand: impl Fn(&str) -> String) -> RewriteStats {
    let mut stats = RewriteStats::default();

    for entry in doc.entries_mut() {
        stats.total += 1;
        if entry.is_blacklisted() {
            stats.skipped_blacklisted += 1;
            continue;
        }
        if entry.fields.len() <= TableEntry::FRIENDLY_NAME_FIELD {
            stats.skipped_missing += 1;
            continue;
        }

        let friendly = expand(&entry.signal_name);
        if friendly.eq_ignore_ascii_case(&entry.signal_name) {
            stats.skipped_same += 1;
            continue;
        }
        if entry.friendly_name() == Some(friendly.as_str()) {
            stats.unchanged += 1;
            continue;
        }

        trace!(signal = %entry.signal_name, %friendly, "annotating entry");
        entry.set_friendly_name(&friendly);
        stats.updated += 1;
    }

    debug!(?stats, "annotate pass finished");
    stats
}

/// Refine existing friendly names in place.
///
/// `refine` maps `(signal_name, current_label)` to the corrected label.
/// Entries without a friendly name (or with the `NULL` placeholder) are
/// skipped; blacklisted entries are never touched.
pub fn refine_with(
    doc: &mut TableDocument,
    refine: impl Fn(&str, &str) -> String,
) -> RewriteStats {
    let mut stats = RewriteStats::default();

    for entry in doc.entries_mut() {
        stats.total += 1;
        if entry.is_blacklisted() {
            stats.skipped_blacklisted += 1;
            continue;
        }
        let Some(current) = entry.friendly_name().map(str::to_string) else {
            stats.skipped_missing += 1;
            continue;
        };

        let refined = refine(&entry.signal_name, &current);
        if refined == current {
            stats.unchanged += 1;
            continue;
        }

        trace!(signal = %entry.signal_name, from = %current, to = %refined, "refining entry");
        entry.set_friendly_name(&refined);
        stats.updated += 1;
    }

    debug!(?stats, "refine pass finished");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
static const ElsterIndex ElsterTable[] = {
  { \"FATAL_ERROR\", 0x0002, 0, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, true, false },
  { \"WPVORLAUFIST\", 0x01a8, et_dec_val, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, false, true },
  { \"XYZQ\", 0x9999, 0, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, false, false },
};
";

    #[test]
    fn test_annotate_skips_blacklisted_and_same() {
        let mut doc = TableDocument::parse(SAMPLE);
        let stats = annotate_with(&mut doc, |signal| match signal {
            "WPVORLAUFIST" => "Wärmepumpe Vorlauf Ist".to_string(),
            other => other.to_string(),
        });

        assert_eq!(stats.total, 3);
        assert_eq!(stats.updated, 1);
        assert_eq!(stats.skipped_blacklisted, 1);
        assert_eq!(stats.skipped_same, 1);

        let rendered = doc.render();
        assert!(rendered.contains("\"Wärmepumpe Vorlauf Ist\""));
        // Blacklisted entry keeps its NULL placeholder.
        assert!(rendered.contains(
            "{ \"FATAL_ERROR\", 0x0002, 0, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, true, false },"
        ));
    }

    #[test]
    fn test_annotate_is_stable_on_second_run() {
        let mut doc = TableDocument::parse(SAMPLE);
        let expand = |signal: &str| match signal {
            "WPVORLAUFIST" => "Wärmepumpe Vorlauf Ist".to_string(),
            other => other.to_string(),
        };
        annotate_with(&mut doc, expand);
        let stats = annotate_with(&mut doc, expand);
        assert_eq!(stats.updated, 0);
        assert_eq!(stats.unchanged, 1);
    }

    #[test]
    fn test_refine_skips_null_placeholders() {
        let mut doc = TableDocument::parse(SAMPLE);
        let stats = refine_with(&mut doc, |_, label| label.to_uppercase());
        assert_eq!(stats.updated, 0);
        assert_eq!(stats.skipped_missing, 2);
        assert_eq!(stats.skipped_blacklisted, 1);
    }

    #[test]
    fn test_refine_rewrites_existing_labels() {
        let text = "\
static const ElsterIndex ElsterTable[] = {
  { \"RAUMSOLLTEMP_III\", 0x0059, et_dec_val, \"Raum Soll Temp Iii\", NULL, NULL, NULL, NULL, NULL, NULL, NULL, false, true },
};
";
        let mut doc = TableDocument::parse(text);
        let stats = refine_with(&mut doc, |_, label| label.replace("Iii", "III"));
        assert_eq!(stats.updated, 1);
        assert!(doc.render().contains("\"Raum Soll Temp III\""));
    }
}
