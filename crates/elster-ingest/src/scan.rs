//! Scanning of the line-oriented ElsterTable source.
//!
//! The table lives inside a C header as a struct-literal array:
//!
//! ```text
//! static const ElsterIndex ElsterTable[] = {
//!   { "AUSSENTEMP", 0x000c, et_dec_val, "Außen Temp", ... },
//!   ...
//! };
//! ```
//!
//! Only lines between the `ElsterTable[]` header and the closing `};` are
//! candidates for parsing; everything else (comments, blank lines, the rest
//! of the header file) is carried through verbatim. A malformed candidate
//! line is not an error: it is preserved untouched and logged.

use std::fs;
use std::path::Path;

use tracing::debug;

use elster_model::{Result, TableEntry, strip_quotes};

/// Marker identifying the table header line.
const TABLE_HEADER_MARKER: &str = "ElsterTable[]";

/// One line of the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableLine {
    /// A line preserved byte for byte.
    Verbatim(String),
    /// A parsed table entry.
    Entry(TableEntry),
}

/// A parsed table source file.
///
/// Parsing is loss-free: `render` of an unmodified document reproduces the
/// input (entries re-render from their untouched raw fields).
#[derive(Debug, Clone, Default)]
pub struct TableDocument {
    lines: Vec<TableLine>,
}

impl TableDocument {
    /// Parse source text into verbatim lines and table entries.
    pub fn parse(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut in_table = false;

        for line in text.lines() {
            if line.contains(TABLE_HEADER_MARKER) {
                in_table = true;
                lines.push(TableLine::Verbatim(line.to_string()));
                continue;
            }
            if in_table && line.trim() == "};" {
                in_table = false;
                lines.push(TableLine::Verbatim(line.to_string()));
                continue;
            }
            if in_table {
                match parse_entry_line(line) {
                    Some(entry) => lines.push(TableLine::Entry(entry)),
                    None => {
                        if line.trim_start().starts_with('{') {
                            debug!(line, "skipping malformed table entry line");
                        }
                        lines.push(TableLine::Verbatim(line.to_string()));
                    }
                }
            } else {
                lines.push(TableLine::Verbatim(line.to_string()));
            }
        }

        Self { lines }
    }

    /// Read and parse a table file.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Render the document back to source text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                TableLine::Verbatim(text) => out.push_str(text),
                TableLine::Entry(entry) => out.push_str(&entry.render()),
            }
            out.push('\n');
        }
        out
    }

    /// Render and write the document to a file.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }

    /// All lines, in source order.
    pub fn lines(&self) -> &[TableLine] {
        &self.lines
    }

    /// Iterator over parsed entries.
    pub fn entries(&self) -> impl Iterator<Item = &TableEntry> {
        self.lines.iter().filter_map(|line| match line {
            TableLine::Entry(entry) => Some(entry),
            TableLine::Verbatim(_) => None,
        })
    }

    /// Mutable iterator over parsed entries.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut TableEntry> {
        self.lines.iter_mut().filter_map(|line| match line {
            TableLine::Entry(entry) => Some(entry),
            TableLine::Verbatim(_) => None,
        })
    }
}

/// Parse one `{ ... },` entry line.
///
/// Returns `None` for lines that do not have the entry shape or carry no
/// signal name; such lines are preserved verbatim by the caller.
pub fn parse_entry_line(line: &str) -> Option<TableEntry> {
    let stripped = line.trim();
    if !(stripped.starts_with('{') && stripped.ends_with("},")) {
        return None;
    }

    let indent_len = line.len() - line.trim_start().len();
    let indent = line[..indent_len].to_string();
    let content = stripped[1..stripped.len() - 2].trim();

    let fields = split_fields(content);
    let first = fields.first()?;
    if !first.starts_with('"') {
        return None;
    }
    let signal_name = strip_quotes(first).to_string();

    Some(TableEntry {
        indent,
        signal_name,
        fields,
    })
}

/// Split entry content on commas, respecting quoted strings and backslash
/// escapes inside them.
fn split_fields(content: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut escape = false;

    for ch in content.chars() {
        if escape {
            current.push(ch);
            escape = false;
        } else if ch == '\\' {
            current.push(ch);
            escape = true;
        } else if ch == '"' {
            in_quote = !in_quote;
            current.push(ch);
        } else if ch == ',' && !in_quote {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    if !current.trim().is_empty() {
        fields.push(current.trim().to_string());
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"// Elster register table
static const ElsterIndex ElsterTable[] = {
  { "INDEX_NOT_FOUND", 0x0000, 0, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, true, false },
  // temperatures
  { "AUSSENTEMP", 0x000c, et_dec_val, "Außen Temp", "sensor", "temperature", "°C", "measurement", "mdi:thermometer", NULL, NULL, false, true },
  not an entry line
};
// trailer
"#;

    #[test]
    fn test_parse_recognizes_entries_inside_table_only() {
        let doc = TableDocument::parse(SAMPLE);
        let names: Vec<&str> = doc.entries().map(|e| e.signal_name.as_str()).collect();
        assert_eq!(names, vec!["INDEX_NOT_FOUND", "AUSSENTEMP"]);
    }

    #[test]
    fn test_render_round_trips_unmodified_document() {
        let doc = TableDocument::parse(SAMPLE);
        assert_eq!(doc.render(), SAMPLE);
    }

    #[test]
    fn test_quoted_commas_do_not_split_fields() {
        let entry =
            parse_entry_line("  { \"WP_STATUS\", 0x01a7, 0, \"Status, kurz\", NULL },").unwrap();
        assert_eq!(entry.fields[3], "\"Status, kurz\"");
        assert_eq!(entry.fields.len(), 5);
    }

    #[test]
    fn test_entry_outside_table_stays_verbatim() {
        let text = "{ \"AUSSENTEMP\", 0x000c, 0 },\n";
        let doc = TableDocument::parse(text);
        assert_eq!(doc.entries().count(), 0);
        assert_eq!(doc.render(), text);
    }

    #[test]
    fn test_malformed_entry_line_is_preserved() {
        let text = "static const ElsterIndex ElsterTable[] = {\n  { garbage without quotes },\n};\n";
        let doc = TableDocument::parse(text);
        assert_eq!(doc.entries().count(), 0);
        assert_eq!(doc.render(), text);
    }
}
