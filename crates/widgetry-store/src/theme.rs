//! # Theme Store
//!
//! Persists the light/dark preference under [`THEME_KEY`].
//! An unknown or missing stored value means [`Theme::Light`].

use tracing::{debug, warn};
use widgetry_core::{Theme, THEME_KEY};

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Theme preference persisted through `S`.
#[derive(Debug)]
pub struct ThemeStore<S> {
    store: S,
    theme: Theme,
}

impl<S: KeyValueStore> ThemeStore<S> {
    /// Reads the saved preference. Never fails.
    pub fn load(store: S) -> Self {
        let theme = match store.get(THEME_KEY) {
            Ok(Some(value)) => value.parse::<Theme>().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "Could not read theme preference");
                Theme::default()
            }
        };
        ThemeStore { store, theme }
    }

    /// The active theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switches to the other theme and saves it.
    pub fn toggle(&mut self) -> StoreResult<Theme> {
        self.set(self.theme.toggled())
    }

    /// Switches to `theme` and saves it.
    pub fn set(&mut self, theme: Theme) -> StoreResult<Theme> {
        self.theme = theme;
        debug!(%theme, "Theme changed");
        self.store.set(THEME_KEY, theme.as_str())?;
        Ok(theme)
    }

    /// Forgets the saved preference and falls back to the default.
    pub fn reset(&mut self) -> StoreResult<Theme> {
        self.theme = Theme::default();
        self.store.remove(THEME_KEY)?;
        Ok(self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[test]
    fn test_defaults_to_light() {
        let store = ThemeStore::load(MemoryStore::new());
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let backing = MemoryStore::new();
        let mut store = ThemeStore::load(backing.clone());
        assert_eq!(store.toggle().unwrap(), Theme::Dark);

        assert_eq!(backing.get(THEME_KEY).unwrap(), Some("dark".to_string()));
        assert_eq!(ThemeStore::load(backing).theme(), Theme::Dark);
    }

    #[test]
    fn test_unknown_value_falls_back() {
        let backing = MemoryStore::with_entries([(THEME_KEY, "neon")]);
        assert_eq!(ThemeStore::load(backing).theme(), Theme::Light);
    }

    #[test]
    fn test_reset_removes_key() {
        let backing = MemoryStore::with_entries([(THEME_KEY, "dark")]);
        let mut store = ThemeStore::load(backing.clone());
        assert_eq!(store.reset().unwrap(), Theme::Light);
        assert_eq!(backing.get(THEME_KEY).unwrap(), None);
    }
}
