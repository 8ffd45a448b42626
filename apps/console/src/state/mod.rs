//! # Host State
//!
//! ```text
//! state/
//! ├── config.rs   ◄─── WidgetryConfig (defaults → TOML → env)
//! ├── storage.rs  ◄─── Storage backend chosen at startup
//! └── session.rs  ◄─── Calculator + ItemListStore + ThemeStore
//! ```

pub mod config;
pub mod session;
pub mod storage;

pub use config::{ConfigError, StorageBackend, WidgetryConfig};
pub use session::Session;
pub use storage::Storage;
