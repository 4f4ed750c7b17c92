//! Prompt construction and response parsing for batched refinement.
//!
//! A batch of `(signal, current friendly name)` pairs is sent as a numbered
//! list; the model answers one numbered line per entry, either `OK` or the
//! corrected friendly name. Parsing is deliberately forgiving: anything that
//! cannot be matched back to an entry leaves that entry unchanged.

use tracing::warn;

/// System prompt fixing the refinement rules.
///
/// The rules mirror the deterministic refinement passes so the model only
/// repairs what the segmenter could not, without inventing new words.
pub const SYSTEM_PROMPT: &str = "\
You are a German-English technical translator specializing in heat pump terminology.

Your task: Review signal names and their friendly names. Suggest improvements ONLY when the friendly name has clear issues.

CRITICAL RULES - STRICTLY FOLLOW:
1. Signal names are in ALL CAPS and contain ABBREVIATIONS
2. Friendly names should EXPAND abbreviations to FULL WORDS (never shorten them!)
3. NEVER abbreviate full words: \"Temperatur\" is CORRECT, \"Temp\" is WRONG
4. NEVER add words not present in the signal name
5. Fix these specific issues ONLY:
   - Incorrect splits: \"Betrieb Sstunden\" -> \"Betriebsstunden\"
   - Fragments: \"Minimum Imalbegrenzung\" -> \"Minimalbegrenzung\"
   - Missing umlauts: \"Staendige\" -> \"St\u{e4}ndige\"
   - Wrong casing: \"Ww\" -> \"WW\", \"Io\" -> \"IO\", \"Can\" -> \"CAN\"
   - Roman numerals: \"Ii\" -> \"II\", \"Iii\" -> \"III\"
6. Keep compound words as ONE word when they are one word in signal name
7. Use spaces to separate meaningful parts only
8. If friendly name is already good (properly expanded), respond with just \"OK\"

OUTPUT FORMAT - CRITICAL:
- Respond with one numbered line per entry, in order
- If the friendly name is correct: the number, then exactly \"OK\"
- If it needs improvement: the number, then ONLY the corrected friendly name
- DO NOT include the signal name, arrows, or any prefix in your response";

/// One entry submitted for refinement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// Raw signal name.
    pub signal_name: String,
    /// Friendly name currently in the table.
    pub current_label: String,
}

/// Outcome for one entry of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The label to keep: either the improved one or the unchanged input.
    pub label: String,
    /// True when the model proposed a different label.
    pub changed: bool,
}

impl Suggestion {
    fn unchanged(label: &str) -> Self {
        Self {
            label: label.to_string(),
            changed: false,
        }
    }
}

/// Build the user prompt for one batch.
pub fn build_batch_prompt(items: &[BatchItem]) -> String {
    let mut prompt = String::from(
        "Review these signal names and their friendly names.\n\n\
         For each entry, respond on a NEW LINE with:\n\
         - The number followed by period and space\n\
         - Then either 'OK' if good, or the corrected friendly name\n\n\
         Example format:\n\
         1. OK\n\
         2. Kessel Soll Temperatur\n\
         3. OK\n\n\
         Now review these:\n\n",
    );
    for (i, item) in items.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. Signal: {}, Current: {}\n",
            i + 1,
            item.signal_name,
            item.current_label
        ));
    }
    prompt
}

/// Parse a numbered batch response into per-entry suggestions.
///
/// Missing or surplus lines are tolerated: entries without a matching
/// response keep their current label.
pub fn parse_batch_response(response: &str, items: &[BatchItem]) -> Vec<Suggestion> {
    let mut answers: Vec<String> = Vec::new();
    for line in response.lines() {
        let line = line.trim();
        if line.is_empty() || !line.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }
        let Some((_, text)) = line.split_once(". ") else {
            continue;
        };
        let text = text
            .trim()
            .strip_prefix("Response:")
            .map_or_else(|| text.trim(), str::trim);
        answers.push(text.to_string());
    }

    if answers.len() != items.len() {
        warn!(
            expected = items.len(),
            received = answers.len(),
            "batch response count mismatch, keeping unmatched entries unchanged"
        );
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match answers.get(i) {
            Some(answer) if !answer.eq_ignore_ascii_case("OK") => Suggestion {
                label: answer.clone(),
                changed: true,
            },
            _ => Suggestion::unchanged(&item.current_label),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<BatchItem> {
        vec![
            BatchItem {
                signal_name: "WPVORLAUFIST".to_string(),
                current_label: "Wärmepumpe Vorlauf Ist".to_string(),
            },
            BatchItem {
                signal_name: "BETRIEBSSTUNDEN".to_string(),
                current_label: "Betrieb Sstunden".to_string(),
            },
            BatchItem {
                signal_name: "TEILVORRANG_WW".to_string(),
                current_label: "Teilvorrang Ww".to_string(),
            },
        ]
    }

    #[test]
    fn test_prompt_numbers_entries() {
        let prompt = build_batch_prompt(&items());
        assert!(prompt.contains("1. Signal: WPVORLAUFIST, Current: Wärmepumpe Vorlauf Ist"));
        assert!(prompt.contains("3. Signal: TEILVORRANG_WW, Current: Teilvorrang Ww"));
    }

    #[test]
    fn test_parse_ok_and_corrections() {
        let response = "1. OK\n2. Betriebsstunden\n3. Teilvorrang WW\n";
        let suggestions = parse_batch_response(response, &items());
        assert_eq!(suggestions[0], Suggestion::unchanged("Wärmepumpe Vorlauf Ist"));
        assert!(suggestions[1].changed);
        assert_eq!(suggestions[1].label, "Betriebsstunden");
        assert_eq!(suggestions[2].label, "Teilvorrang WW");
    }

    #[test]
    fn test_parse_tolerates_chatter_and_missing_lines() {
        let response = "Here are my reviews:\n\n1. OK\n2. Response: Betriebsstunden\n";
        let suggestions = parse_batch_response(response, &items());
        assert!(!suggestions[0].changed);
        assert_eq!(suggestions[1].label, "Betriebsstunden");
        // No third answer: entry keeps its current label.
        assert_eq!(suggestions[2], Suggestion::unchanged("Teilvorrang Ww"));
    }

    #[test]
    fn test_parse_case_insensitive_ok() {
        let response = "1. ok\n2. Ok\n3. OK\n";
        let suggestions = parse_batch_response(response, &items());
        assert!(suggestions.iter().all(|s| !s.changed));
    }
}
