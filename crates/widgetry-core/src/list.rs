//! # List Module
//!
//! Records of the dynamic list and their render descriptors.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Item List Lifecycle                                  │
//! │                                                                         │
//! │  persisted blob ──► deserialize() ──► ItemList::from_items()           │
//! │                                             │                           │
//! │          ┌──────────────────────────────────┼────────────────────┐      │
//! │          ▼                                  ▼                    ▼      │
//! │   create(NewItem)                      remove(id)             clear()   │
//! │   (insert at head)                     (first match)                    │
//! │          │                                  │                    │      │
//! │          └──────────────────────────────────┼────────────────────┘      │
//! │                                             ▼                           │
//! │                      serialize() ──► persisted blob                     │
//! │                      render()    ──► Vec<ItemDescriptor> ──► Renderer   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//! The list is newest-first. Every insertion goes to index 0.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Title used when the user leaves the field blank.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Description used when the user leaves the field blank.
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Label text of each record's delete control.
pub const DELETE_LABEL: &str = "Delete";

// =============================================================================
// List Item
// =============================================================================

/// A user-created record.
///
/// ## Persisted Shape
/// ```json
/// {
///   "id": 1760870400000,
///   "title": "Groceries",
///   "description": "Milk, eggs",
///   "value": "12.50",
///   "createdAt": "2025-10-19T10:40:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    /// Unique, timestamp-derived identifier. The only lookup key.
    #[ts(type = "number")]
    pub id: u64,

    pub title: String,

    pub description: String,

    /// Free-form extra value, absent when the user left it blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// When the record was created. Never changes.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl ListItem {
    /// Builds a record from form fields, filling placeholders for blanks.
    pub fn new(id: u64, fields: NewItem, created_at: DateTime<Utc>) -> Self {
        let fields = fields.normalized();
        ListItem {
            id,
            title: fields.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: fields
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            value: fields.value,
            created_at,
        }
    }
}

/// Form fields for a new record. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub value: Option<String>,
}

impl NewItem {
    /// Creates fields with just a title.
    pub fn titled(title: impl Into<String>) -> Self {
        NewItem {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Trims every field and drops the ones left empty.
    pub fn normalized(self) -> Self {
        fn clean(field: Option<String>) -> Option<String> {
            field
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        }

        NewItem {
            title: clean(self.title),
            description: clean(self.description),
            value: clean(self.value),
        }
    }
}

// =============================================================================
// Id Allocation
// =============================================================================

/// Hands out timestamp-derived ids that never repeat.
///
/// ## Why Not Just The Timestamp?
/// ```text
/// add_item() at t=1000ms  ──►  id 1000
/// add_item() at t=1000ms  ──►  id 1001   (same tick: last + 1)
/// add_item() at t=999ms   ──►  id 1002   (clock stepped back)
/// add_item() at t=5000ms  ──►  id 5000
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdAllocator {
    last: Option<u64>,
}

impl IdAllocator {
    /// Records an id already in use so it is never handed out again.
    pub fn observe(&mut self, id: u64) {
        self.last = Some(self.last.map_or(id, |last| last.max(id)));
    }

    /// Returns the next id for a record created at `now`.
    pub fn next(&mut self, now: DateTime<Utc>) -> u64 {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = match self.last {
            Some(last) => millis.max(last.saturating_add(1)),
            None => millis,
        };
        self.last = Some(id);
        id
    }
}

/// Gives every record after the first holder of an id a fresh id.
///
/// Order is kept. Returns `(old, new)` for each record that was re-keyed.
/// Fresh ids come from an allocator that has seen every id in `items`, so
/// they collide with nothing.
pub fn rekey_duplicates(items: &mut [ListItem]) -> Vec<(u64, u64)> {
    let mut ids = IdAllocator::default();
    for item in items.iter() {
        ids.observe(item.id);
    }

    let mut seen = HashSet::with_capacity(items.len());
    let mut rekeyed = Vec::new();
    for item in items.iter_mut() {
        if !seen.insert(item.id) {
            let fresh = ids.next(item.created_at);
            rekeyed.push((item.id, fresh));
            item.id = fresh;
            seen.insert(fresh);
        }
    }
    rekeyed
}

// =============================================================================
// Serialization
// =============================================================================

/// Serializes records to the JSON array stored under [`crate::ITEMS_KEY`].
pub fn serialize(items: &[ListItem]) -> CoreResult<String> {
    Ok(serde_json::to_string(items)?)
}

/// Parses a JSON array of records.
///
/// Fails on malformed input; callers decide whether that is fatal.
pub fn deserialize(blob: &str) -> CoreResult<Vec<ListItem>> {
    Ok(serde_json::from_str(blob)?)
}

// =============================================================================
// Render Descriptors
// =============================================================================

/// How creation dates are shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateStyle {
    pattern: String,
}

impl DateStyle {
    /// The default pattern, e.g. `Oct 19, 2026`.
    pub const DEFAULT_PATTERN: &'static str = "%b %-d, %Y";

    /// Creates a style from a `strftime` pattern.
    ///
    /// Patterns chrono cannot render are rejected here, so that rendering
    /// itself never fails.
    pub fn new(pattern: impl Into<String>) -> CoreResult<Self> {
        let pattern = pattern.into();
        let invalid = pattern.is_empty()
            || StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error));
        if invalid {
            return Err(CoreError::InvalidDateFormat(pattern));
        }
        Ok(DateStyle { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Formats a timestamp with this style.
    pub fn format(&self, at: &DateTime<Utc>) -> String {
        at.format(&self.pattern).to_string()
    }
}

impl Default for DateStyle {
    fn default() -> Self {
        DateStyle {
            pattern: Self::DEFAULT_PATTERN.to_string(),
        }
    }
}

/// What the renderer needs to draw one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescriptor {
    /// Key for the delete control; pass back to `remove_item`.
    #[ts(type = "number")]
    pub id: u64,
    pub title: String,
    /// Creation date, already formatted.
    pub date: String,
    pub description: String,
    pub value: Option<String>,
    pub delete_label: String,
}

impl ItemDescriptor {
    fn from_item(item: &ListItem, style: &DateStyle) -> Self {
        ItemDescriptor {
            id: item.id,
            title: item.title.clone(),
            date: style.format(&item.created_at),
            description: item.description.clone(),
            value: item.value.clone(),
            delete_label: DELETE_LABEL.to_string(),
        }
    }
}

// =============================================================================
// Item List
// =============================================================================

/// The ordered, newest-first sequence of records.
///
/// ## Invariants
/// - Ids handed out by [`ItemList::create`] are unique within the list
/// - Index 0 is the most recently created record
#[derive(Debug, Clone, Default)]
pub struct ItemList {
    items: Vec<ListItem>,
    ids: IdAllocator,
}

impl ItemList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps records loaded from storage, keeping their order.
    ///
    /// Duplicate ids are re-keyed with [`rekey_duplicates`].
    pub fn from_items(mut items: Vec<ListItem>) -> Self {
        rekey_duplicates(&mut items);
        let mut ids = IdAllocator::default();
        for item in &items {
            ids.observe(item.id);
        }
        ItemList { items, ids }
    }

    /// Creates a record at the head of the list and returns a copy.
    pub fn create(&mut self, fields: NewItem, now: DateTime<Utc>) -> ListItem {
        let id = self.ids.next(now);
        let item = ListItem::new(id, fields, now);
        let inserted = self.insert_front(item.clone());
        debug_assert!(inserted, "allocator handed out id {} twice", id);
        item
    }

    /// Puts an existing record at the head of the list.
    ///
    /// Returns `false` and leaves the list untouched if the id is taken.
    pub fn insert_front(&mut self, item: ListItem) -> bool {
        if self.get(item.id).is_some() {
            return false;
        }
        self.ids.observe(item.id);
        self.items.insert(0, item);
        true
    }

    /// Removes the first record with `id`, keeping the others in order.
    pub fn remove(&mut self, id: u64) -> Option<ListItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn get(&self, id: u64) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serializes the whole list.
    pub fn to_json(&self) -> CoreResult<String> {
        serialize(&self.items)
    }

    /// Projects the list onto render descriptors, in list order.
    ///
    /// Pure: calling it twice without a mutation in between gives equal
    /// output.
    pub fn render(&self, style: &DateStyle) -> Vec<ItemDescriptor> {
        self.items
            .iter()
            .map(|item| ItemDescriptor::from_item(item, style))
            .collect()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn arb_datetime() -> impl Strategy<Value = DateTime<Utc>> {
        // 1970 to 2100, any nanosecond
        (0i64..4_102_444_800i64, 0u32..1_000_000_000u32)
            .prop_filter_map("timestamp in range", |(secs, nanos)| {
                Utc.timestamp_opt(secs, nanos).single()
            })
    }

    fn arb_item() -> impl Strategy<Value = ListItem> {
        (
            any::<u64>(),
            any::<String>(),
            any::<String>(),
            prop::option::of(any::<String>()),
            arb_datetime(),
        )
            .prop_map(|(id, title, description, value, created_at)| ListItem {
                id,
                title,
                description,
                value,
                created_at,
            })
    }

    proptest! {
        #[test]
        fn serialize_round_trip(items in prop::collection::vec(arb_item(), 0..8)) {
            let blob = serialize(&items).expect("serialize");
            let restored = deserialize(&blob).expect("deserialize");
            prop_assert_eq!(restored, items);
        }

        #[test]
        fn loaded_ids_are_unique(ids in prop::collection::vec(0u64..16, 0..12)) {
            let items: Vec<_> = ids
                .iter()
                .map(|&id| ListItem::new(id, NewItem::default(), DateTime::UNIX_EPOCH))
                .collect();
            let list = ItemList::from_items(items);

            let mut seen = HashSet::new();
            prop_assert!(list.items().iter().all(|item| seen.insert(item.id)));
            prop_assert_eq!(list.len(), ids.len());
        }
    }
}
