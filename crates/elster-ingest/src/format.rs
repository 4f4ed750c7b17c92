//! Column alignment for table entry lines.
//!
//! Two passes over the document: first collect the maximum width of every
//! field position across all entries, then pad each field to that width.
//! `NULL` and the boolean flags are right-aligned, everything else is
//! left-aligned, matching how the table is maintained by hand.

use crate::scan::TableDocument;

/// Number of fields in the metadata entry format.
const FIELD_COUNT: usize = 13;

/// Align entry fields into columns, in place.
///
/// Returns the number of entries that were reformatted. Width is measured
/// in characters, so umlauts and `°` count as one column each.
pub fn align_columns(doc: &mut TableDocument) -> usize {
    let mut max_widths = [0usize; FIELD_COUNT];
    for entry in doc.entries() {
        for (i, field) in entry.fields.iter().take(FIELD_COUNT).enumerate() {
            max_widths[i] = max_widths[i].max(field.chars().count());
        }
    }

    let mut formatted = 0;
    for entry in doc.entries_mut() {
        let mut changed = false;
        for (i, field) in entry.fields.iter_mut().take(FIELD_COUNT).enumerate() {
            let padded = pad_field(field.trim(), max_widths[i]);
            if *field != padded {
                *field = padded;
                changed = true;
            }
        }
        if changed {
            formatted += 1;
        }
    }
    formatted
}

fn pad_field(field: &str, width: usize) -> String {
    let len = field.chars().count();
    let padding = width.saturating_sub(len);
    if matches!(field, "NULL" | "true" | "false") {
        format!("{}{}", " ".repeat(padding), field)
    } else {
        format!("{}{}", field, " ".repeat(padding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_snapshot() {
        let text = "\
static const ElsterIndex ElsterTable[] = {
  { \"AUSSENTEMP\", 0x000c, et_dec_val, \"Außen Temp\", false, true },
  { \"WP_STATUS\", 0x01a7, 0, NULL, true, false },
};
";
        let mut doc = TableDocument::parse(text);
        let formatted = align_columns(&mut doc);
        assert_eq!(formatted, 2);
        insta::assert_snapshot!(doc.render(), @r#"
static const ElsterIndex ElsterTable[] = {
  { "AUSSENTEMP", 0x000c, et_dec_val, "Außen Temp", false,  true },
  { "WP_STATUS" , 0x01a7, 0         ,         NULL,  true, false },
};
"#);
    }

    #[test]
    fn test_alignment_is_stable_after_reparse() {
        let text = "\
static const ElsterIndex ElsterTable[] = {
  { \"AUSSENTEMP\", 0x000c, et_dec_val, \"Außen Temp\", NULL, false, true },
  { \"WP_STATUS\", 0x01a7, 0, \"WP Status\", NULL, false, true },
};
";
        let mut doc = TableDocument::parse(text);
        align_columns(&mut doc);
        let once = doc.render();
        // Parsing trims the padding again; realigning must reproduce it.
        let mut doc = TableDocument::parse(&once);
        align_columns(&mut doc);
        assert_eq!(doc.render(), once);
    }
}
