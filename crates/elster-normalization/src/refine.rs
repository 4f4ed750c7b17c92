//! Refinement passes over expanded friendly names.
//!
//! The segmenter occasionally splits a real compound ("Betrieb Sstunden"),
//! loses acronym casing ("Ww"), or lowercases roman numerals ("Iii"). The
//! refinement pipeline repairs these with a fixed sequence of passes, each
//! taking the previous pass's words plus the original signal name.
//!
//! The signal name acts purely as a validation oracle: a merge is performed
//! only when the merged word appears as a contiguous uppercase substring of
//! the signal name, so no pass can fabricate words the identifier does not
//! license. The whole pipeline is total and idempotent, which makes it safe
//! to re-run over tables that were already refined.

/// Acronyms whose canonical casing differs from title case.
const ACRONYM_CASINGS: &[(&str, &str)] = &[
    ("Ww", "WW"),
    ("Id", "ID"),
    ("Can", "CAN"),
    ("Pc", "PC"),
    ("Usb", "USB"),
    ("Io", "IO"),
    ("Ii", "II"),
    ("Iii", "III"),
    ("Iv", "IV"),
    ("Vi", "VI"),
    ("Vii", "VII"),
    ("Viii", "VIII"),
    ("Ix", "IX"),
    ("Xram", "XRAM"),
    ("Iram", "IRAM"),
];

/// Roman numerals kept uppercase regardless of prior casing.
const ROMAN_NUMERALS: &[&str] = &["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];

/// Spelling corrections applied only when the signal name contains the
/// required substring, to avoid rewriting unrelated labels.
const LOCALE_CORRECTIONS: &[(&str, &str, &str)] = &[
    ("Staendige", "Ständige", "STAENDIGE"),
    ("Staendig", "Ständig", "STAENDIG"),
];

/// Refine a friendly label against its originating signal name.
///
/// Deterministic and idempotent; never fails. An empty label stays empty
/// and a label with nothing to fix is returned unchanged (modulo collapsed
/// whitespace).
pub fn refine_friendly_name(signal_name: &str, label: &str) -> String {
    let signal_upper = signal_name.to_uppercase();

    let words: Vec<String> = label.split_whitespace().map(str::to_string).collect();
    let words = merge_doubled_letter_splits(&signal_upper, words);
    let words = merge_fragment_splits(&signal_upper, words);
    let words = canonicalize_acronyms(words);
    let words = uppercase_roman_numerals(words);

    apply_locale_corrections(&signal_upper, words.join(" "))
}

/// Pass 1: merge word pairs split at a doubled letter.
///
/// Two shapes are repaired, both oracle-checked:
/// - the previous word ends with the letter the next word starts with
///   ("Druck Kessel" against `DRUCKESSEL`); merged as `prev + next[1:]`,
/// - the next word itself starts with a doubled letter ("Sstunden" after
///   "Betrieb" against `BETRIEBSSTUNDEN`); merged as `prev + next`.
///
/// Scanning continues from the merged word so chains collapse in one pass.
fn merge_doubled_letter_splits(signal_upper: &str, words: Vec<String>) -> Vec<String> {
    let mut fixed: Vec<String> = Vec::with_capacity(words.len());

    for word in words {
        if word.chars().count() > 1
            && let Some(prev) = fixed.last()
            && !prev.is_empty()
        {
            let first = word.chars().next().unwrap();
            let rest = &word[first.len_utf8()..];

            if chars_eq_ignore_case(prev.chars().last().unwrap(), first) {
                let candidate = format!("{prev}{rest}");
                if signal_upper.contains(&candidate.to_uppercase()) {
                    let merged = format!("{}{}", prev, rest.to_lowercase());
                    *fixed.last_mut().unwrap() = merged;
                    continue;
                }
            }

            if starts_with_doubled_letter(&word) {
                let candidate = format!("{prev}{word}");
                if signal_upper.contains(&candidate.to_uppercase()) {
                    let merged = format!("{}{}", prev, word.to_lowercase());
                    *fixed.last_mut().unwrap() = merged;
                    continue;
                }
            }
        }
        fixed.push(word);
    }

    fixed
}

/// Pass 2: merge fragment-looking continuations.
///
/// A following word that starts lowercase is a strong mis-split signal and
/// is merged whole; a following word whose first letter duplicates the
/// current word's last letter is merged without that letter. Both merges
/// must pass the signal-name oracle.
fn merge_fragment_splits(signal_upper: &str, words: Vec<String>) -> Vec<String> {
    let mut fixed: Vec<String> = Vec::with_capacity(words.len());
    let mut i = 0;

    while i < words.len() {
        let word = &words[i];
        if i + 1 < words.len() {
            let next = &words[i + 1];
            if next.chars().count() > 1 && !word.is_empty() {
                let next_first = next.chars().next().unwrap();

                if next_first.is_lowercase() {
                    let candidate = format!("{word}{next}");
                    if signal_upper.contains(&candidate.to_uppercase()) {
                        fixed.push(format!("{}{}", word, next.to_lowercase()));
                        i += 2;
                        continue;
                    }
                }

                if next_first.is_uppercase()
                    && chars_eq_ignore_case(word.chars().last().unwrap(), next_first)
                {
                    let rest = &next[next_first.len_utf8()..];
                    let candidate = format!("{word}{rest}");
                    if signal_upper.contains(&candidate.to_uppercase()) {
                        fixed.push(format!("{}{}", word, rest.to_lowercase()));
                        i += 2;
                        continue;
                    }
                }
            }
        }
        fixed.push(word.clone());
        i += 1;
    }

    fixed
}

/// Pass 3: exact whole-word substitution against the acronym casing table.
fn canonicalize_acronyms(words: Vec<String>) -> Vec<String> {
    words
        .into_iter()
        .map(|word| {
            match ACRONYM_CASINGS
                .iter()
                .find(|(wrong, _)| *wrong == word.as_str())
            {
                Some((_, canonical)) => (*canonical).to_string(),
                None => word,
            }
        })
        .collect()
}

/// Pass 4: force roman numerals uppercase, whatever pass 3 left behind.
fn uppercase_roman_numerals(words: Vec<String>) -> Vec<String> {
    words
        .into_iter()
        .map(|word| {
            match ROMAN_NUMERALS
                .iter()
                .find(|numeral| word.eq_ignore_ascii_case(numeral))
            {
                Some(numeral) => (*numeral).to_string(),
                None => word,
            }
        })
        .collect()
}

/// Pass 5: fixed respellings gated on a required signal-name substring.
fn apply_locale_corrections(signal_upper: &str, label: String) -> String {
    let mut result = label;
    for (wrong, correct, required) in LOCALE_CORRECTIONS {
        if signal_upper.contains(required) && result.contains(wrong) {
            result = result.replace(wrong, correct);
        }
    }
    result
}

/// Case-insensitive single-character comparison.
fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// True when the word begins with the same letter twice (e.g. "Sstunden").
fn starts_with_doubled_letter(word: &str) -> bool {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) => chars_eq_ignore_case(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merges_doubled_letter_split() {
        assert_eq!(
            refine_friendly_name("BETRIEBSSTUNDEN", "Betrieb Sstunden"),
            "Betriebsstunden"
        );
    }

    #[test]
    fn test_merge_requires_oracle_support() {
        // Same shape of split, but the signal name does not contain the
        // concatenation, so the words stay apart.
        assert_eq!(
            refine_friendly_name("BETRIEB_SSTUNDEN_X", "Betrieb Sstunden"),
            "Betrieb Sstunden"
        );
    }

    #[test]
    fn test_merges_lowercase_fragment() {
        assert_eq!(
            refine_friendly_name("MINIMALBEGRENZUNG", "Minimal begrenzung"),
            "Minimalbegrenzung"
        );
    }

    #[test]
    fn test_acronym_casing() {
        assert_eq!(
            refine_friendly_name("TEILVORRANG_WW", "Teilvorrang Ww"),
            "Teilvorrang WW"
        );
        assert_eq!(refine_friendly_name("GERAETE_ID", "Geräte Id"), "Geräte ID");
    }

    #[test]
    fn test_roman_numerals() {
        assert_eq!(
            refine_friendly_name("RAUMSOLLTEMP_III", "Raum Soll Temp Iii"),
            "Raum Soll Temp III"
        );
        assert_eq!(
            refine_friendly_name("HEIZKURVE_IV", "Heizkurve iv"),
            "Heizkurve IV"
        );
    }

    #[test]
    fn test_locale_correction_is_gated_on_signal() {
        assert_eq!(
            refine_friendly_name("STAENDIGE_LUEFTUNG", "Staendige Lüftung"),
            "Ständige Lüftung"
        );
        // Without the required substring the spelling stays untouched.
        assert_eq!(
            refine_friendly_name("LUEFTUNG", "Staendige Lüftung"),
            "Staendige Lüftung"
        );
    }

    #[test]
    fn test_empty_label() {
        assert_eq!(refine_friendly_name("AUSSENTEMP", ""), "");
    }

    #[test]
    fn test_clean_label_passes_through() {
        assert_eq!(
            refine_friendly_name("WPVORLAUFIST", "Wärmepumpe Vorlauf Ist"),
            "Wärmepumpe Vorlauf Ist"
        );
    }

    #[test]
    fn test_idempotent_on_examples() {
        let cases = [
            ("BETRIEBSSTUNDEN", "Betrieb Sstunden"),
            ("RAUMSOLLTEMP_III", "Raum Soll Temp Iii"),
            ("STAENDIGE_LUEFTUNG", "Staendige Lüftung"),
            ("TEILVORRANG_WW", "Teilvorrang Ww"),
        ];
        for (signal, label) in cases {
            let once = refine_friendly_name(signal, label);
            let twice = refine_friendly_name(signal, &once);
            assert_eq!(once, twice, "refine not idempotent for {signal}");
        }
    }
}
