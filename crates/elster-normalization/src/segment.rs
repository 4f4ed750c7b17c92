//! Recursive longest-match segmentation of signal names.
//!
//! A signal name like `WPVORLAUFIST` carries no separators between its
//! abbreviations. The segmenter finds dictionary patterns inside each
//! fragment, replaces them with their expansions, and recurses into the
//! unmatched left and right remainders until fragments are a single
//! character or contain no known pattern.
//!
//! Underscores mark true word breaks and are honored before any matching:
//! each underscore-delimited token is segmented independently, so no match
//! ever spans a token boundary.

use elster_model::AbbreviationTable;

/// Expand a raw signal name into a space-separated friendly label.
///
/// The result is title-cased per word, with German umlaut digraphs folded
/// before casing so `STUETZSTELLE` comes out as "Stützstelle".
///
/// Empty input yields an empty string; a name with no known abbreviations
/// yields itself as a single title-cased word.
pub fn expand_signal_name(table: &AbbreviationTable, signal_name: &str) -> String {
    if signal_name.is_empty() {
        return String::new();
    }

    let spaced = signal_name.replace('_', " ");
    let expanded: Vec<String> = spaced
        .split_whitespace()
        .map(|token| split_fragment(table, token))
        .collect();
    let joined = expanded.join(" ");

    // Collapse any repeated whitespace from the recursive joins.
    let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");

    // Fold digraphs on the joined string before title-casing so pairs that
    // straddle a word's casing boundary are still converted.
    let folded = fold_umlaut_digraphs(&collapsed);

    folded
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Recursively split one fragment against the dictionary.
///
/// Patterns are tried in table order (longest first); the first pattern that
/// occurs anywhere wins and its leftmost occurrence is consumed. This exact
/// tie-break is load-bearing: a shorter pattern earlier in the table beats a
/// longer occurrence of a later one, and changing it changes outputs.
fn split_fragment(table: &AbbreviationTable, fragment: &str) -> String {
    if fragment.chars().count() <= 1 {
        return fragment.to_string();
    }

    let upper = fragment.to_ascii_uppercase();
    for entry in table.entries() {
        let Some(pos) = upper.find(entry.pattern) else {
            continue;
        };
        let left = &fragment[..pos];
        let right = &fragment[pos + entry.pattern.len()..];

        let mut parts: Vec<String> = Vec::with_capacity(3);
        if !left.is_empty() {
            parts.push(split_fragment(table, left));
        }
        parts.push(entry.expansion.to_string());
        if !right.is_empty() {
            parts.push(split_fragment(table, right));
        }
        return parts.join(" ");
    }

    // No pattern occurs; the fragment becomes its own word.
    fragment.to_string()
}

/// Fold German umlaut digraphs into single characters.
///
/// Both casings are handled because this runs before title-casing.
fn fold_umlaut_digraphs(text: &str) -> String {
    text.replace("Ue", "Ü")
        .replace("ue", "ü")
        .replace("Ae", "Ä")
        .replace("ae", "ä")
        .replace("Oe", "Ö")
        .replace("oe", "ö")
}

/// Uppercase the first character, lowercase the rest.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(signal_name: &str) -> String {
        expand_signal_name(&AbbreviationTable::builtin(), signal_name)
    }

    #[test]
    fn test_concatenated_abbreviations() {
        assert_eq!(expand("WPVORLAUFIST"), "Wärmepumpe Vorlauf Ist");
        assert_eq!(expand("KESSELSOLLTEMP"), "Kessel Soll Temperatur");
        assert_eq!(expand("AUSSENTEMP"), "Außen Temperatur");
    }

    #[test]
    fn test_underscore_boundaries_are_preserved() {
        assert_eq!(
            expand("EL_AUFNAHMELEISTUNG_WW_TAG_WH"),
            "Elektrisch Aufnahmeleistung Warmwasser Tag Wh"
        );
    }

    #[test]
    fn test_digraph_folded_before_casing() {
        assert_eq!(expand("STUETZSTELLE"), "Stützstelle");
        assert_eq!(expand("RUECKLAUFISTTEMP"), "Rücklauf Ist Temperatur");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(expand(""), "");
    }

    #[test]
    fn test_unmatched_name_is_single_title_cased_word() {
        assert_eq!(expand("XYZQ"), "Xyzq");
    }

    #[test]
    fn test_single_character_fragments() {
        assert_eq!(expand("X"), "X");
        assert_eq!(expand("LZ_VERD_1_WW"), "Laufzeit Verdichter 1 Warmwasser");
    }

    #[test]
    fn test_first_pattern_in_table_order_wins() {
        // VERD is a 4-char pattern and sits ahead of TEMP in declaration
        // order; inside VERDAMPFERTEMP the 10-char VERDAMPFER wins outright.
        assert_eq!(expand("VERDAMPFERTEMP"), "Verdampfer Temperatur");
        assert_eq!(expand("VERDTEMP"), "Verdichter Temperatur");
    }

    #[test]
    fn test_consumed_span_is_not_rescanned() {
        // TEMP occurs literally inside TEMPORALE but the longer pattern
        // consumes the whole span.
        assert_eq!(expand("TEMPORALE"), "Temporale");
    }

    #[test]
    fn test_title_case_destroys_internal_casing() {
        let table = AbbreviationTable::new(&[("WW", "WarmWasser")]);
        assert_eq!(expand_signal_name(&table, "WW"), "Warmwasser");
    }
}
