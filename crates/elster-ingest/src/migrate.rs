//! Migration of legacy 3-field entries to the metadata format.
//!
//! The legacy table only carried `{ name, index, type }`. The metadata
//! format appends friendly name, component, device class, unit, state
//! class, icon, two reserved fields, and the `blacklisted`/`active` flags,
//! 13 fields in total. Curated signals get their metadata filled in,
//! blacklisted signals get the minimal form, everything else gets `NULL`
//! placeholders.

use tracing::debug;

use elster_model::MetadataRegistry;

use crate::scan::TableDocument;

/// Number of fields in the legacy entry format.
const LEGACY_FIELD_COUNT: usize = 3;

/// Counters for one migration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrateStats {
    /// Entries seen in the table.
    pub total: usize,
    /// Legacy entries upgraded to the metadata format.
    pub migrated: usize,
    /// Entries upgraded with curated metadata.
    pub with_metadata: usize,
    /// Entries upgraded as blacklisted.
    pub blacklisted: usize,
    /// Entries already in the metadata format.
    pub already_migrated: usize,
}

/// Upgrade every legacy entry in the document.
///
/// Entries that already have more than three fields are left untouched.
pub fn migrate_entries(doc: &mut TableDocument, registry: &MetadataRegistry) -> MigrateStats {
    let mut stats = MigrateStats::default();

    for entry in doc.entries_mut() {
        stats.total += 1;
        if entry.fields.len() != LEGACY_FIELD_COUNT {
            stats.already_migrated += 1;
            continue;
        }

        let name = entry.signal_name.clone();
        if registry.is_blacklisted(&name) {
            entry.fields.extend(
                std::iter::repeat_n("NULL".to_string(), 8)
                    .chain(["true".to_string(), "false".to_string()]),
            );
            stats.blacklisted += 1;
        } else if let Some(meta) = registry.get(&name) {
            entry.fields.extend([
                format!("\"{}\"", meta.friendly_name),
                format!("\"{}\"", meta.component),
                format!("\"{}\"", meta.device_class),
                format!("\"{}\"", meta.unit),
                format!("\"{}\"", meta.state_class),
                format!("\"{}\"", meta.icon),
                "NULL".to_string(),
                "NULL".to_string(),
                "false".to_string(),
                "true".to_string(),
            ]);
            stats.with_metadata += 1;
        } else {
            entry.fields.extend(
                std::iter::repeat_n("NULL".to_string(), 8)
                    .chain(["false".to_string(), "false".to_string()]),
            );
        }
        stats.migrated += 1;
    }

    debug!(?stats, "migration finished");
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: &str = "\
static const ElsterIndex ElsterTable[] = {
  { \"AUSSENTEMP\", 0x000c, et_dec_val },
  { \"FATAL_ERROR\", 0x0002, 0 },
  { \"UNKNOWN_SIGNAL\", 0x9999, 0 },
};
";

    #[test]
    fn test_migrates_curated_blacklisted_and_default() {
        let mut doc = TableDocument::parse(LEGACY);
        let registry = MetadataRegistry::builtin();
        let stats = migrate_entries(&mut doc, &registry);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.migrated, 3);
        assert_eq!(stats.with_metadata, 1);
        assert_eq!(stats.blacklisted, 1);

        let rendered = doc.render();
        assert!(rendered.contains(
            "{ \"AUSSENTEMP\", 0x000c, et_dec_val, \"Außen Temp\", \"sensor\", \"temperature\", \"°C\", \"measurement\", \"mdi:thermometer\", NULL, NULL, false, true },"
        ));
        assert!(rendered.contains(
            "{ \"FATAL_ERROR\", 0x0002, 0, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, true, false },"
        ));
        assert!(rendered.contains(
            "{ \"UNKNOWN_SIGNAL\", 0x9999, 0, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, false, false },"
        ));
    }

    #[test]
    fn test_migration_is_idempotent() {
        let mut doc = TableDocument::parse(LEGACY);
        let registry = MetadataRegistry::builtin();
        migrate_entries(&mut doc, &registry);
        let once = doc.render();

        let mut doc = TableDocument::parse(&once);
        let stats = migrate_entries(&mut doc, &registry);
        assert_eq!(stats.migrated, 0);
        assert_eq!(stats.already_migrated, 3);
        assert_eq!(doc.render(), once);
    }
}
