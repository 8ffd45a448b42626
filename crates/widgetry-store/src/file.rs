//! # File-Backed Storage
//!
//! A [`KeyValueStore`] kept in one JSON file, the desktop stand-in for
//! browser local storage.
//!
//! ## File Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ~/.local/share/widgetry/storage.json                                   │
//! │                                                                         │
//! │  {                                                                      │
//! │    "widgetry.items": "[{\"id\":1760870400000, ... }]",                  │
//! │    "widgetry.theme": "dark"                                             │
//! │  }                                                                      │
//! │                                                                         │
//! │  One JSON object. Every value is a string, exactly as the widget       │
//! │  handed it to `set`.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read-Modify-Write
//! Nothing is cached: every `get` reads the file and every `set`/`remove`
//! rewrites it. Two handles on the same path therefore never clobber each
//! other's keys. Writes go to a sibling temp file that is renamed over the
//! original, so a crash mid-write leaves the previous contents intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;

type Entries = BTreeMap<String, String>;

/// Storage persisted to a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Opens (or prepares to create) the storage file at `path`.
    ///
    /// ## What This Does
    /// 1. Creates the parent directory if needed
    /// 2. Reads the file once to fail early on a corrupt store
    ///
    /// The file itself is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        info!(path = %path.display(), "Opening storage file");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let store = FileStore { path };
        let entries = store.read_entries()?;
        debug!(keys = entries.len(), "Storage file ready");
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> StoreResult<Entries> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&contents).map_err(|e| StoreError::CorruptFile {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn write_entries(&self, entries: &Entries) -> StoreResult<()> {
        let contents = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, contents).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)?;
        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
            debug!(key, "Removed value");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("nested").join("storage.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get("anything").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let (_dir, mut store) = temp_store();
        store.set("widgetry.theme", "dark").unwrap();

        let reopened = FileStore::open(store.path()).unwrap();
        assert_eq!(reopened.get("widgetry.theme").unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_handles_do_not_clobber_each_other() {
        let (_dir, mut a) = temp_store();
        let mut b = FileStore::open(a.path()).unwrap();

        a.set("one", "1").unwrap();
        b.set("two", "2").unwrap();

        assert_eq!(a.get("one").unwrap(), Some("1".to_string()));
        assert_eq!(a.get("two").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn test_remove() {
        let (_dir, mut store) = temp_store();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::CorruptFile { .. }));
    }
}
