//! Parsed representation of one Elster table entry line.
//!
//! Entry lines look like
//! `  { "AUSSENTEMP", 0x000c, et_dec_val, "Außen Temp", ... },` with a
//! variable number of comma-separated fields. The struct keeps the raw field
//! strings so a rewrite touches only the fields it changes and preserves
//! everything else byte for byte.

/// One parsed `{ ... },` line from the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    /// Leading whitespace of the source line.
    pub indent: String,

    /// Signal name from the first field, without quotes.
    pub signal_name: String,

    /// All fields in source order, quotes included.
    pub fields: Vec<String>,
}

impl TableEntry {
    /// Index of the friendly-name field in the 13-field metadata format.
    pub const FRIENDLY_NAME_FIELD: usize = 3;

    /// Current friendly name, if the entry has one.
    ///
    /// Returns `None` for short entries and for the `NULL` placeholder.
    pub fn friendly_name(&self) -> Option<&str> {
        let field = self.fields.get(Self::FRIENDLY_NAME_FIELD)?;
        if field == "NULL" {
            return None;
        }
        Some(strip_quotes(field))
    }

    /// Replace the friendly-name field with a quoted value.
    ///
    /// No-op on entries too short to carry one.
    pub fn set_friendly_name(&mut self, name: &str) {
        if let Some(field) = self.fields.get_mut(Self::FRIENDLY_NAME_FIELD) {
            *field = format!("\"{name}\"");
        }
    }

    /// True when the entry carries the blacklist marker (`true, false`
    /// in the trailing flag fields).
    pub fn is_blacklisted(&self) -> bool {
        let n = self.fields.len();
        n >= 2 && self.fields[n - 2] == "true" && self.fields[n - 1] == "false"
    }

    /// Rebuild the source line (without trailing newline).
    pub fn render(&self) -> String {
        format!("{}{{ {} }},", self.indent, self.fields.join(", "))
    }
}

/// Strip one pair of surrounding double quotes, if present.
pub fn strip_quotes(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(fields: &[&str]) -> TableEntry {
        TableEntry {
            indent: "  ".to_string(),
            signal_name: strip_quotes(fields[0]).to_string(),
            fields: fields.iter().map(|f| (*f).to_string()).collect(),
        }
    }

    #[test]
    fn test_friendly_name_accessors() {
        let mut e = entry(&["\"AUSSENTEMP\"", "0x000c", "et_dec_val", "NULL"]);
        assert_eq!(e.friendly_name(), None);
        e.set_friendly_name("Außen Temperatur");
        assert_eq!(e.friendly_name(), Some("Außen Temperatur"));
        assert_eq!(
            e.render(),
            "  { \"AUSSENTEMP\", 0x000c, et_dec_val, \"Außen Temperatur\" },"
        );
    }

    #[test]
    fn test_blacklist_marker() {
        let blacklisted = entry(&["\"FATAL_ERROR\"", "0x0002", "0", "NULL", "true", "false"]);
        assert!(blacklisted.is_blacklisted());
        let active = entry(&["\"AUSSENTEMP\"", "0x000c", "0", "NULL", "false", "true"]);
        assert!(!active.is_blacklisted());
    }
}
