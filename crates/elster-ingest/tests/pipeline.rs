//! End-to-end table rewriting with the real normalization functions.

use elster_ingest::{TableDocument, annotate_with, refine_with};
use elster_model::AbbreviationTable;
use elster_normalization::{expand_signal_name, refine_friendly_name};

const TABLE: &str = "\
// Generated from the Stiebel Eltron register map
static const ElsterIndex ElsterTable[] = {
  { \"WPVORLAUFIST\", 0x01a8, et_dec_val, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, false, true },
  { \"EL_AUFNAHMELEISTUNG_WW_TAG_WH\", 0x091a, et_double_val, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, false, true },
  { \"BETRIEBSSTUNDEN\", 0x0014, 0, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, false, false },
  { \"FEHLERMELDUNG\", 0x0001, 0, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, true, false },
};
";

#[test]
fn annotate_then_refine_produces_clean_labels() {
    let table = AbbreviationTable::builtin();
    let mut doc = TableDocument::parse(TABLE);

    let annotate_stats = annotate_with(&mut doc, |signal| expand_signal_name(&table, signal));
    assert_eq!(annotate_stats.total, 4);
    assert_eq!(annotate_stats.updated, 3);
    assert_eq!(annotate_stats.skipped_blacklisted, 1);

    let refine_stats = refine_with(&mut doc, refine_friendly_name);
    assert_eq!(refine_stats.updated, 1);

    let rendered = doc.render();
    assert!(rendered.contains("\"Wärmepumpe Vorlauf Ist\""));
    assert!(rendered.contains("\"Elektrisch Aufnahmeleistung Warmwasser Tag Wh\""));
    assert!(rendered.contains("\"Betriebsstunden\""));
    // The blacklisted entry never receives a label.
    assert!(rendered.contains(
        "{ \"FEHLERMELDUNG\", 0x0001, 0, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, true, false },"
    ));
}

#[test]
fn rerunning_the_pipeline_changes_nothing() {
    let table = AbbreviationTable::builtin();
    let mut doc = TableDocument::parse(TABLE);
    annotate_with(&mut doc, |signal| expand_signal_name(&table, signal));
    refine_with(&mut doc, refine_friendly_name);
    let first = doc.render();

    let mut doc = TableDocument::parse(&first);
    let annotate_stats = annotate_with(&mut doc, |signal| expand_signal_name(&table, signal));
    let refine_stats = refine_with(&mut doc, refine_friendly_name);
    assert_eq!(doc.render(), first);
    assert_eq!(annotate_stats.updated, 1);
    assert_eq!(refine_stats.updated, 1);
}
