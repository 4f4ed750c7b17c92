//! Abbreviation dictionary for Elster signal names.
//!
//! Signal names on the Elster/CAN bus are terse concatenations of German
//! abbreviations (`WPVORLAUFIST`, `LZ_VERD_1_HEIZBETRIEB`). The dictionary
//! maps each uppercase abbreviation to its proper-cased expansion.
//!
//! ## Ordering
//!
//! The segmenter tries patterns in table order and takes the first one that
//! occurs anywhere in a fragment. Correct greedy matching therefore requires
//! longest-pattern-first ordering, with declaration order breaking ties.
//! `AbbreviationTable::new` enforces this with a stable sort instead of
//! trusting the literal order of a hand-maintained list.

/// A single abbreviation-to-expansion mapping.
///
/// `pattern` is the uppercase token searched for inside signal names;
/// `expansion` is the proper-cased German word it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbbreviationEntry {
    /// Uppercase token as it appears inside signal names (e.g. "WP").
    pub pattern: &'static str,

    /// Proper-cased expansion (e.g. "Wärmepumpe").
    pub expansion: &'static str,
}

/// Built-in abbreviation list in declaration order.
///
/// Entries of equal pattern length keep this relative order in the table.
const BUILTIN_ABBREVIATIONS: &[(&str, &str)] = &[
    ("AUFNAHMELEISTUNG", "Aufnahmeleistung"),
    ("LUEFTUNGSSTUFE", "Lüftungsstufe"),
    ("LEISTUNGSZWANG", "Leistungszwang"),
    ("FEHLERMELDUNG", "Fehlermeldung"),
    ("VOLUMENSTROM", "Volumenstrom"),
    ("QUELLENPUMPE", "Quellenpumpe"),
    ("STUETZSTELLE", "Stützstelle"),
    ("HILFSKESSEL", "Hilfskessel"),
    ("BETRIEBSART", "Betriebsart"),
    ("VERDAMPFER", "Verdampfer"),
    ("VERDICHTER", "Verdichter"),
    ("DURCHFLUSS", "Durchfluss"),
    ("TEMPERATUR", "Temperatur"),
    ("TEMPORALE", "Temporale"),
    ("RUECKLAUF", "Rücklauf"),
    ("LAUFZEIT", "Laufzeit"),
    ("EINSTELL", "Einstellung"),
    ("LEISTUNG", "Leistung"),
    ("KUEHLUNG", "Kühlung"),
    ("BIVALENT", "Bivalent"),
    ("PARALLEL", "Parallel"),
    ("FREQUENZ", "Frequenz"),
    ("DREHZAHL", "Drehzahl"),
    ("SPEICHER", "Speicher"),
    ("SPANNUNG", "Spannung"),
    ("VORLAUF", "Vorlauf"),
    ("SAMMLER", "Sammler"),
    ("BETRIEB", "Betrieb"),
    ("HEIZUNG", "Heizung"),
    ("ERTRAG", "Ertrag"),
    ("AUSSEN", "Außen"),
    ("MINUTE", "Minute"),
    ("SOCKEL", "Sockel"),
    ("KESSEL", "Kessel"),
    ("DAUER", "Dauer"),
    ("DRUCK", "Druck"),
    ("STROM", "Strom"),
    ("LUEFT", "Lüftung"),
    ("PUMPE", "Pumpe"),
    ("VERD", "Verdichter"),
    ("TEMP", "Temperatur"),
    ("HEIZ", "Heizung"),
    ("RAUM", "Raum"),
    ("SOLL", "Soll"),
    ("MAX", "Maximum"),
    ("MIN", "Minimum"),
    ("SUM", "Summe"),
    ("TAG", "Tag"),
    ("IST", "Ist"),
    ("FKT", "Funktion"),
    ("HZG", "Heizung"),
    ("WW", "Warmwasser"),
    ("WP", "Wärmepumpe"),
    ("EL", "Elektrisch"),
    ("LZ", "Laufzeit"),
];

/// Ordered, immutable abbreviation dictionary.
///
/// Constructed once at startup and shared read-only with the segmenter.
#[derive(Debug, Clone)]
pub struct AbbreviationTable {
    entries: Vec<AbbreviationEntry>,
}

impl AbbreviationTable {
    /// Build a table from `(pattern, expansion)` pairs.
    ///
    /// Patterns must be non-empty and uppercase ASCII. The entries are
    /// stably sorted by descending pattern length, so callers may declare
    /// them in any order without breaking greedy matching.
    pub fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        debug_assert!(pairs.iter().all(|(p, _)| {
            !p.is_empty() && p.chars().all(|c| c.is_ascii_uppercase())
        }));
        let mut entries: Vec<AbbreviationEntry> = pairs
            .iter()
            .map(|&(pattern, expansion)| AbbreviationEntry {
                pattern,
                expansion,
            })
            .collect();
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.pattern.len()));
        Self { entries }
    }

    /// The built-in dictionary for Stiebel Eltron heat pump signals.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_ABBREVIATIONS)
    }

    /// Entries in match-priority order (longest pattern first).
    pub fn entries(&self) -> &[AbbreviationEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AbbreviationTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_sorted_longest_first() {
        let table = AbbreviationTable::builtin();
        let lengths: Vec<usize> = table.entries().iter().map(|e| e.pattern.len()).collect();
        let mut sorted = lengths.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(lengths, sorted);
    }

    #[test]
    fn test_sorting_is_stable_within_equal_lengths() {
        // VERD and TEMP are both 4 chars; VERD is declared first and must
        // stay ahead so VERDAMPFER remainders resolve to Verdichter.
        let table = AbbreviationTable::builtin();
        let four: Vec<&str> = table
            .entries()
            .iter()
            .filter(|e| e.pattern.len() == 4)
            .map(|e| e.pattern)
            .collect();
        assert_eq!(four, vec!["VERD", "TEMP", "HEIZ", "RAUM", "SOLL"]);
    }

    #[test]
    fn test_declaration_order_does_not_matter() {
        let table = AbbreviationTable::new(&[("WW", "Warmwasser"), ("VORLAUF", "Vorlauf")]);
        assert_eq!(table.entries()[0].pattern, "VORLAUF");
        assert_eq!(table.entries()[1].pattern, "WW");
    }
}
