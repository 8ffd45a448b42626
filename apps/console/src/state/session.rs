//! # Session State
//!
//! The three widgets of one console session. The list and theme stores
//! share one storage backend; the calculator is never persisted.

use tracing::info;
use widgetry_core::Calculator;
use widgetry_store::{ItemListStore, ThemeStore};

use super::config::WidgetryConfig;
use super::storage::Storage;
use crate::error::AppResult;

/// Everything a command can act on.
#[derive(Debug)]
pub struct Session {
    pub calculator: Calculator,
    pub list: ItemListStore<Storage>,
    pub theme: ThemeStore<Storage>,
}

impl Session {
    /// Opens storage and loads persisted widget state.
    pub fn open(config: &WidgetryConfig) -> AppResult<Self> {
        let storage = Storage::open(config)?;
        Self::with_storage(storage, config)
    }

    /// Builds a session on an already-opened backend.
    pub fn with_storage(storage: Storage, config: &WidgetryConfig) -> AppResult<Self> {
        let list = ItemListStore::initialize(storage.clone()).with_date_style(config.date_style()?);
        let theme = ThemeStore::load(storage);

        info!(
            items = list.items().len(),
            theme = %theme.theme(),
            "Session ready"
        );

        Ok(Session {
            calculator: Calculator::with_format(config.number_format()),
            list,
            theme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use widgetry_core::{NewItem, Theme, ITEMS_KEY};
    use widgetry_store::{KeyValueStore, MemoryStore};

    #[test]
    fn test_restores_persisted_state() {
        let backing = MemoryStore::new();
        {
            let mut session =
                Session::with_storage(Storage::Memory(backing.clone()), &WidgetryConfig::default())
                    .unwrap();
            session.list.add_item(NewItem::titled("kept")).unwrap();
            session.theme.toggle().unwrap();
        }

        let session =
            Session::with_storage(Storage::Memory(backing), &WidgetryConfig::default()).unwrap();
        assert_eq!(session.list.items()[0].title, "kept");
        assert_eq!(session.theme.theme(), Theme::Dark);
    }

    #[test]
    fn test_corrupt_list_does_not_block_startup() {
        let backing = MemoryStore::with_entries([(ITEMS_KEY, "not json")]);
        let session =
            Session::with_storage(Storage::Memory(backing.clone()), &WidgetryConfig::default())
                .unwrap();

        assert!(session.list.items().is_empty());
        assert_eq!(backing.get(ITEMS_KEY).unwrap(), Some("not json".to_string()));
    }

    #[test]
    fn test_calculator_uses_configured_separator() {
        let mut config = WidgetryConfig::default();
        config.display.thousands_separator = ' ';
        let mut session = Session::with_storage(Storage::Memory(MemoryStore::new()), &config).unwrap();

        for digit in "12345".chars() {
            session.calculator.append_digit(digit);
        }
        assert_eq!(session.calculator.display().current, "12 345");
    }
}
