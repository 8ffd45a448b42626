//! # Item List Store
//!
//! Binds the core [`ItemList`] to a [`KeyValueStore`]: loads once, then
//! re-serializes the whole list after every mutation.
//!
//! ## Persist Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Item List Store                                      │
//! │                                                                         │
//! │  initialize(store)                                                      │
//! │    get(ITEMS_KEY) ──► load_items() ──► ItemList                         │
//! │                       (bad blob → empty list + warn!)                   │
//! │                                                                         │
//! │  add_item / remove_item / clear_all                                     │
//! │    1. mutate ItemList in memory                                         │
//! │    2. set(ITEMS_KEY, serialize(all items))                              │
//! │    3. write failed? → Err(StoreError), memory keeps the mutation        │
//! │                                                                         │
//! │  render() ──► Vec<ItemDescriptor> ──► Renderer                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use widgetry_core::list::{self, DateStyle, ItemDescriptor, ItemList, ListItem, NewItem};
use widgetry_core::ITEMS_KEY;

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Parses a persisted list blob, degrading to an empty list.
///
/// A malformed blob is logged and discarded rather than returned as an
/// error. Records sharing an id keep their place; every one after the first
/// gets a fresh id.
pub fn load_items(blob: Option<&str>) -> Vec<ListItem> {
    let Some(blob) = blob else {
        return Vec::new();
    };

    match list::deserialize(blob) {
        Ok(mut items) => {
            for (old, new) in list::rekey_duplicates(&mut items) {
                warn!(old, new, "Duplicate item id in stored list, re-keyed");
            }
            items
        }
        Err(e) => {
            warn!(error = %e, "Discarding malformed item list");
            Vec::new()
        }
    }
}

/// The dynamic list, persisted through `S`.
#[derive(Debug)]
pub struct ItemListStore<S> {
    store: S,
    list: ItemList,
    date_style: DateStyle,
}

impl<S: KeyValueStore> ItemListStore<S> {
    /// Loads the list from `store`.
    ///
    /// Never fails: a read error or malformed blob gives an empty list.
    pub fn initialize(store: S) -> Self {
        let blob = match store.get(ITEMS_KEY) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "Could not read item list, starting empty");
                None
            }
        };
        Self::from_blob(store, blob.as_deref())
    }

    /// Builds the store from an already-read blob.
    pub fn from_blob(store: S, blob: Option<&str>) -> Self {
        let items = load_items(blob);
        info!(count = items.len(), "Item list loaded");
        ItemListStore {
            store,
            list: ItemList::from_items(items),
            date_style: DateStyle::default(),
        }
    }

    /// Sets how creation dates are rendered.
    pub fn with_date_style(mut self, date_style: DateStyle) -> Self {
        self.date_style = date_style;
        self
    }

    /// Creates a record at the head of the list and persists.
    pub fn add_item(&mut self, fields: NewItem) -> StoreResult<ListItem> {
        self.add_item_at(fields, Utc::now())
    }

    /// Same as [`add_item`](Self::add_item) with an explicit clock reading.
    pub fn add_item_at(&mut self, fields: NewItem, now: DateTime<Utc>) -> StoreResult<ListItem> {
        let item = self.list.create(fields, now);
        debug!(id = item.id, title = %item.title, "Item added");
        self.persist()?;
        Ok(item)
    }

    /// Removes the record with `id` and persists.
    ///
    /// Returns `Ok(false)` without writing when no record matches.
    pub fn remove_item(&mut self, id: u64) -> StoreResult<bool> {
        if self.list.remove(id).is_none() {
            debug!(id, "Remove ignored, no such item");
            return Ok(false);
        }
        debug!(id, "Item removed");
        self.persist()?;
        Ok(true)
    }

    /// Removes every record and persists the empty list.
    pub fn clear_all(&mut self) -> StoreResult<()> {
        let count = self.list.len();
        self.list.clear();
        debug!(count, "Item list cleared");
        self.persist()
    }

    /// Records in display order (newest first).
    pub fn items(&self) -> &[ListItem] {
        self.list.items()
    }

    /// Render descriptors for the current records.
    pub fn render(&self) -> Vec<ItemDescriptor> {
        self.list.render(&self.date_style)
    }

    fn persist(&mut self) -> StoreResult<()> {
        let blob = self.list.to_json()?;
        self.store.set(ITEMS_KEY, &blob)
    }
}
