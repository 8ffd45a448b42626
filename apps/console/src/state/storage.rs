//! # Storage State
//!
//! The backend chosen by configuration, behind one concrete type so the
//! list and theme stores can share it.

use tracing::info;
use widgetry_store::{FileStore, KeyValueStore, MemoryStore, StoreResult};

use super::config::{StorageBackend, WidgetryConfig};
use crate::error::AppResult;

/// Runtime-selected key-value backend.
///
/// Clones refer to the same data: `MemoryStore` clones share their map,
/// and `FileStore` clones re-read the same file on every access.
#[derive(Debug, Clone)]
pub enum Storage {
    Memory(MemoryStore),
    File(FileStore),
}

impl Storage {
    /// Opens the backend named in `config`.
    pub fn open(config: &WidgetryConfig) -> AppResult<Self> {
        match config.backend() {
            StorageBackend::Memory => {
                info!("Using in-memory storage, nothing will be saved");
                Ok(Storage::Memory(MemoryStore::new()))
            }
            StorageBackend::File => {
                let path = config.data_file_path()?;
                Ok(Storage::File(FileStore::open(path)?))
            }
        }
    }

    pub fn backend(&self) -> StorageBackend {
        match self {
            Storage::Memory(_) => StorageBackend::Memory,
            Storage::File(_) => StorageBackend::File,
        }
    }
}

impl KeyValueStore for Storage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match self {
            Storage::Memory(store) => store.get(key),
            Storage::File(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        match self {
            Storage::Memory(store) => store.set(key, value),
            Storage::File(store) => store.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        match self {
            Storage::Memory(store) => store.remove(key),
            Storage::File(store) => store.remove(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_backend() {
        let mut config = WidgetryConfig::default();
        config.storage.backend = StorageBackend::Memory;

        let mut storage = Storage::open(&config).unwrap();
        let shared = storage.clone();
        storage.set("k", "v").unwrap();

        assert_eq!(storage.backend(), StorageBackend::Memory);
        assert_eq!(shared.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_file_backend_uses_configured_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("storage.json");
        let mut config = WidgetryConfig::default();
        config.storage.data_file = Some(path.clone());

        let mut storage = Storage::open(&config).unwrap();
        storage.set("widgetry.theme", "dark").unwrap();

        assert_eq!(storage.backend(), StorageBackend::File);
        assert!(path.exists());
        let reopened = Storage::open(&config).unwrap();
        assert_eq!(reopened.get("widgetry.theme").unwrap(), Some("dark".to_string()));
    }
}
