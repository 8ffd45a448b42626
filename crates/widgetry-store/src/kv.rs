//! # Key-Value Port
//!
//! The storage interface every widget persists through, plus the
//! in-memory backend.
//!
//! ## Port and Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    KeyValueStore                                        │
//! │                                                                         │
//! │   ItemListStore ──┐                                                     │
//! │                   ├──► KeyValueStore ──┬──► MemoryStore (tests, demo)   │
//! │   ThemeStore ─────┘    get/set/remove  └──► FileStore   (JSON on disk)  │
//! │                                                                         │
//! │  Values are strings. Callers own their encoding.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::StoreResult;

/// Synchronous, fallible string storage keyed by string.
///
/// Mirrors browser local storage: a missing key reads as `None`, and
/// removing a missing key succeeds.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes `key`.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

/// In-memory storage.
///
/// Clones share the same map, the way every script on a page shares one
/// local storage. Single-threaded by construction (`Rc`).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        MemoryStore {
            entries: Rc::new(RefCell::new(map)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
