//! # widgetry-store: Persistence Layer for Widgetry
//!
//! This crate owns the key-value storage the widgets persist through.
//! It is the only place persisted state is read or written.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Widgetry Data Flow                               │
//! │                                                                         │
//! │  Host command (add, remove, theme toggle)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  widgetry-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ ItemListStore │    │  ThemeStore   │    │ MemoryStore  │  │   │
//! │  │   │  (list.rs)    │    │  (theme.rs)   │    │ FileStore    │  │   │
//! │  │   │               │───►│               │───►│              │  │   │
//! │  │   │ load / save   │    │ load / save   │    │ get/set/rm   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     storage.json                                │   │
//! │  │   ~/.local/share/widgetry/storage.json                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - The `KeyValueStore` port and the in-memory backend
//! - [`file`] - JSON-file backend
//! - [`list`] - Item list persistence
//! - [`theme`] - Theme preference persistence
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use widgetry_core::NewItem;
//! use widgetry_store::{ItemListStore, MemoryStore};
//!
//! let mut list = ItemListStore::initialize(MemoryStore::new());
//! let item = list.add_item(NewItem::titled("Buy milk")).unwrap();
//! assert_eq!(list.items()[0].id, item.id);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod kv;
pub mod list;
pub mod theme;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use list::ItemListStore;
pub use theme::ThemeStore;
