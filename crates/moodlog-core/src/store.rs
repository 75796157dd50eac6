//! Journal file persistence: read whole table, append one row, rewrite.
//!
//! The rewrite goes through a temp file and an atomic rename, so a crash
//! mid-write can lose the newest entry but never truncate the journal.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::entry::Entry;
use crate::error::Result;
use crate::table::Table;

/// Append-only store of journal entries backed by a single file.
///
/// The file is the sole durable copy; the loaded table is a transient cache
/// for one operation. File handles are opened and released per call.
pub struct EntryStore {
    path: PathBuf,
}

impl EntryStore {
    /// Store at the path the configuration resolves.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            path: config.store_path(),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Append one entry: load what exists, add the row, rewrite atomically.
    pub fn append(&self, entry: &Entry) -> Result<()> {
        let mut table = self.load_all()?;
        table.push_row(entry.to_row());
        self.write_atomic(&table)?;
        tracing::debug!(rows = table.len(), path = %self.path.display(), "appended entry");
        Ok(())
    }

    /// The full journal in append order. Missing file means an empty table.
    pub fn load_all(&self) -> Result<Table> {
        if !self.path.exists() {
            return Ok(Table::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_atomic(&self, table: &Table) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, table)?;
            writer.flush()?;
        }
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryDraft;
    use crate::table::Value;
    use chrono::{TimeZone, Utc};

    fn entry_at(mood: i64, day: u32) -> Entry {
        EntryDraft {
            mood: Some(mood),
            timestamp: Some(Utc.with_ymd_and_hms(2026, 8, day, 9, 0, 0).unwrap()),
            ..Default::default()
        }
        .build()
        .unwrap()
    }

    fn test_store() -> (EntryStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = EntryStore::with_path(dir.path().join("entries.json"));
        (store, dir)
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (store, _dir) = test_store();
        let table = store.load_all().unwrap();
        assert!(table.is_empty());
        assert!(table.column_names().is_empty());
    }

    #[test]
    fn test_append_then_load_keeps_order() {
        let (store, _dir) = test_store();
        for (i, mood) in [7, 3, 5].iter().enumerate() {
            store.append(&entry_at(*mood, i as u32 + 1)).unwrap();
        }
        let table = store.load_all().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0, "mood"), Some(&Value::Int(7)));
        assert_eq!(table.get(1, "mood"), Some(&Value::Int(3)));
        assert_eq!(table.get(2, "mood"), Some(&Value::Int(5)));
    }

    #[test]
    fn test_append_pads_historical_rows_for_new_column() {
        let (store, _dir) = test_store();

        // Simulate an older journal file whose rows predate the tags field.
        let mut old = Table::new();
        old.push_row(vec![
            ("timestamp".into(), Value::Text("2026-08-01T09:00:00+00:00".into())),
            ("mood".into(), Value::Int(6)),
        ]);
        store.write_atomic(&old).unwrap();

        let mut entry = entry_at(8, 2);
        entry.tags = vec!["walk".into()];
        store.append(&entry).unwrap();

        let table = store.load_all().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "tags"), Some(&Value::Null));
        assert_eq!(
            table.get(1, "tags"),
            Some(&Value::List(vec!["walk".into()]))
        );
        // Columns the new row mentions but the old file lacked, and vice
        // versa, are both null-padded rather than an error.
        assert_eq!(table.get(0, "energy"), Some(&Value::Null));
    }

    #[test]
    fn test_append_leaves_no_temp_file() {
        let (store, dir) = test_store();
        store.append(&entry_at(5, 1)).unwrap();
        assert!(store.path().exists());
        assert!(!dir.path().join("entries.json.tmp").exists());
    }

    #[test]
    fn test_roundtrip_preserves_optional_fields() {
        let (store, _dir) = test_store();
        let mut entry = entry_at(9, 3);
        entry.energy = Some(4);
        entry.note = Some("long day".into());
        entry.tags = vec!["work".into(), "late".into()];
        store.append(&entry).unwrap();

        let table = store.load_all().unwrap();
        assert_eq!(table.get(0, "energy"), Some(&Value::Int(4)));
        assert_eq!(table.get(0, "note"), Some(&Value::Text("long day".into())));
        assert_eq!(
            table.get(0, "tags"),
            Some(&Value::List(vec!["work".into(), "late".into()]))
        );
    }

    #[test]
    fn test_store_resolves_path_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.store.path = Some(dir.path().join("journal.json"));
        let store = EntryStore::new(&config);
        assert_eq!(store.path(), &dir.path().join("journal.json"));
    }
}
