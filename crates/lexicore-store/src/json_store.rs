//! JSON-array project store: whole-file read, whole-file rewrite.
//!
//! Record counts are small, so the store stays deliberately simple: load
//! the full array, append, write the full array back. Appends are serialized
//! by an in-process lock so concurrent uploads cannot lose records to a
//! read-modify-write race.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::warn;

use crate::types::{NewProject, ProjectRecord};
use lexicore_core::{Error, Result};

/// Public URL prefix every stored `filePath` must live under.
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// Durable, process-local store for the project record sequence.
pub struct ProjectStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ProjectStore {
    /// Open a store backed by the given file. The file is created on first
    /// append.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Load the full record sequence.
    ///
    /// A missing or unparseable backing file reads as empty. The store must
    /// stay usable even if the file is hand-edited into an invalid state.
    pub fn load(&self) -> Vec<ProjectRecord> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&data) {
            Ok(records) => records,
            Err(e) => {
                warn!("Unparseable store at {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Find a record by id. Absent store means no records, not an error.
    pub fn find_by_id(&self, id: i64) -> Option<ProjectRecord> {
        self.load().into_iter().find(|p| p.id == id)
    }

    /// Append a new record, assigning it a fresh unique id, and persist the
    /// updated sequence. Returns the created record.
    pub fn append(&self, new: NewProject) -> Result<ProjectRecord> {
        if !new.file_path.starts_with(UPLOADS_PREFIX) {
            return Err(Error::InvalidInput(format!(
                "filePath must be under {}: {}",
                UPLOADS_PREFIX, new.file_path
            )));
        }

        let _guard = self.write_lock.lock();

        let mut records = self.load();
        let record = ProjectRecord {
            id: next_id(&records),
            name: new.name,
            description: new.description,
            query: new.query,
            file_path: new.file_path,
        };
        records.push(record.clone());

        self.persist(&records)?;
        Ok(record)
    }

    /// Write the full sequence. Goes through a temp file in the same
    /// directory so a torn write never leaves an unparseable store behind.
    fn persist(&self, records: &[ProjectRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| Error::Storage(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| Error::Storage(e.to_string()))?;
        Ok(())
    }
}

/// Ids derive from the creation timestamp but must never collide: bump past
/// the greatest existing id when two appends land in the same millisecond.
fn next_id(records: &[ProjectRecord]) -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let max_id = records.iter().map(|p| p.id).max().unwrap_or(0);
    now.max(max_id + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (ProjectStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProjectStore::open(dir.path().join("projects.json"));
        (store, dir)
    }

    fn sample(name: &str) -> NewProject {
        NewProject {
            name: name.into(),
            description: String::new(),
            query: "summarize this".into(),
            file_path: format!("/uploads/{}.pdf", name),
        }
    }

    #[test]
    fn test_append_then_find() {
        let (store, _dir) = test_store();
        let created = store.append(sample("contract-a")).unwrap();
        let found = store.find_by_id(created.id).unwrap();
        assert_eq!(found, created);
    }

    #[test]
    fn test_ids_unique_across_appends() {
        let (store, _dir) = test_store();
        let mut ids = Vec::new();
        for i in 0..20 {
            ids.push(store.append(sample(&format!("p{}", i))).unwrap().id);
        }
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_reload_preserves_order() {
        let (store, _dir) = test_store();
        for i in 0..5 {
            store.append(sample(&format!("p{}", i))).unwrap();
        }
        let records = store.load();
        assert_eq!(records.len(), 5);
        let names: Vec<&str> = records.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["p0", "p1", "p2", "p3", "p4"]);
    }

    #[test]
    fn test_missing_store_reads_empty() {
        let (store, _dir) = test_store();
        assert!(store.load().is_empty());
        assert!(store.find_by_id(42).is_none());
    }

    #[test]
    fn test_corrupt_store_reads_empty_and_append_recovers() {
        let (store, dir) = test_store();
        store.append(sample("before")).unwrap();

        std::fs::write(dir.path().join("projects.json"), "{not json!").unwrap();
        assert!(store.load().is_empty());
        assert!(store.find_by_id(1).is_none());

        // Append starts a fresh one-element sequence.
        let created = store.append(sample("after")).unwrap();
        let records = store.load();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], created);
    }

    #[test]
    fn test_rejects_path_outside_uploads() {
        let (store, _dir) = test_store();
        let mut bad = sample("evil");
        bad.file_path = "/etc/passwd".into();
        assert!(store.append(bad).is_err());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = ProjectRecord {
            id: 1700000000000,
            name: "Contract A".into(),
            description: String::new(),
            query: "summarize this".into(),
            file_path: "/uploads/a.pdf".into(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value["filePath"].is_string());
        assert!(value.get("file_path").is_none());
    }
}
