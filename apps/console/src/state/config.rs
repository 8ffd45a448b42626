//! # Configuration State
//!
//! Settings loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     WIDGETRY_STORAGE=memory                                            │
//! │     WIDGETRY_DATA_FILE=/tmp/widgetry.json                              │
//! │     WIDGETRY_THOUSANDS_SEPARATOR=_                                     │
//! │     WIDGETRY_DATE_FORMAT=%Y-%m-%d                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, otherwise                                         │
//! │     ~/.config/widgetry/widgetry.toml (Linux)                           │
//! │     ~/Library/Application Support/dev.widgetry.widgetry/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     file storage in the data dir, ',' grouping, "Oct 19, 2026" dates   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # widgetry.toml
//! [storage]
//! backend = "file"  # file | memory
//! data_file = "/home/me/.local/share/widgetry/storage.json"
//!
//! [display]
//! thousands_separator = " "
//! date_format = "%d/%m/%Y"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};
use widgetry_core::{DateStyle, NumberFormat};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "widgetry.toml";

/// File name of the storage file in the platform data directory.
pub const DATA_FILE_NAME: &str = "storage.json";

// =============================================================================
// Errors
// =============================================================================

/// Configuration failures. All of them stop startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No data directory available; set WIDGETRY_DATA_FILE or [storage] data_file")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Storage Backend
// =============================================================================

/// Where persisted widget state lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file on disk; survives restarts.
    #[default]
    File,

    /// Process memory; gone on exit.
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::Invalid(format!(
                "Unknown storage backend '{}'. Valid options: file, memory",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// `[storage]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Storage file; the platform data directory when unset.
    pub data_file: Option<PathBuf>,
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Grouping character for the calculator display.
    pub thousands_separator: char,

    /// `strftime` pattern for item creation dates.
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            thousands_separator: NumberFormat::default().thousands_separator,
            date_format: DateStyle::DEFAULT_PATTERN.to_string(),
        }
    }
}

// =============================================================================
// Widgetry Config
// =============================================================================

/// Host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetryConfig {
    pub storage: StorageConfig,
    pub display: DisplayConfig,
}

impl WidgetryConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Override with the config file, if it exists
    /// 3. Override with environment variables
    /// 4. Validate
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// file in the platform config directory is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses one TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let separator = self.display.thousands_separator;
        if separator.is_ascii_digit() || matches!(separator, '.' | '-') {
            return Err(ConfigError::Invalid(format!(
                "thousands_separator cannot be '{}'",
                separator
            )));
        }

        DateStyle::new(self.display.date_format.as_str())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if let Some(path) = &self.storage.data_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("data_file cannot be empty".into()));
            }
        }

        Ok(())
    }

    /// Applies `WIDGETRY_*` environment variables.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source.
    ///
    /// Unparseable values are logged and skipped.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("WIDGETRY_STORAGE") {
            match backend.parse() {
                Ok(parsed) => {
                    debug!(backend = %backend, "Overriding storage backend from environment");
                    self.storage.backend = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring WIDGETRY_STORAGE"),
            }
        }

        if let Some(path) = lookup("WIDGETRY_DATA_FILE") {
            debug!(path = %path, "Overriding data file from environment");
            self.storage.data_file = Some(PathBuf::from(path));
        }

        if let Some(separator) = lookup("WIDGETRY_THOUSANDS_SEPARATOR") {
            let mut chars = separator.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => self.display.thousands_separator = c,
                _ => warn!(
                    value = %separator,
                    "Ignoring WIDGETRY_THOUSANDS_SEPARATOR, expected one character"
                ),
            }
        }

        if let Some(pattern) = lookup("WIDGETRY_DATE_FORMAT") {
            self.display.date_format = pattern;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn backend(&self) -> StorageBackend {
        self.storage.backend
    }

    /// Storage file path: the configured one, else the platform data dir.
    pub fn data_file_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.data_file {
            return Ok(path.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join(DATA_FILE_NAME))
            .ok_or(ConfigError::NoDataDir)
    }

    /// Number formatting rules for the calculator.
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::with_separator(self.display.thousands_separator)
    }

    /// Date style for list rendering.
    pub fn date_style(&self) -> ConfigResult<DateStyle> {
        DateStyle::new(self.display.date_format.as_str())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("dev", "widgetry", "widgetry")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = WidgetryConfig::default();
        assert_eq!(config.backend(), StorageBackend::File);
        assert_eq!(config.display.thousands_separator, ',');
        assert_eq!(config.display.date_format, DateStyle::DEFAULT_PATTERN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: WidgetryConfig = toml::from_str(
            r#"
            [display]
            thousands_separator = " "
            "#,
        )
        .unwrap();

        assert_eq!(config.display.thousands_separator, ' ');
        assert_eq!(config.display.date_format, DateStyle::DEFAULT_PATTERN);
        assert_eq!(config.backend(), StorageBackend::File);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[storage]\nbackend = \"memory\"\n\n[display]\ndate_format = \"%Y-%m-%d\"\n",
        )
        .unwrap();

        let config = WidgetryConfig::from_file(&path).unwrap();
        assert_eq!(config.backend(), StorageBackend::Memory);
        assert_eq!(config.date_style().unwrap().pattern(), "%Y-%m-%d");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = WidgetryConfig::load(Some(dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[storage\nbackend = ").unwrap();

        let err = WidgetryConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides() {
        let env = vars(&[
            ("WIDGETRY_STORAGE", "Memory"),
            ("WIDGETRY_DATA_FILE", "/tmp/w.json"),
            ("WIDGETRY_THOUSANDS_SEPARATOR", "'"),
            ("WIDGETRY_DATE_FORMAT", "%d.%m.%Y"),
        ]);
        let mut config = WidgetryConfig::default();
        config.apply_overrides(|name| env.get(name).cloned());

        assert_eq!(config.backend(), StorageBackend::Memory);
        assert_eq!(config.data_file_path().unwrap(), PathBuf::from("/tmp/w.json"));
        assert_eq!(config.number_format().format_operand("1234"), "1'234");
        assert_eq!(config.display.date_format, "%d.%m.%Y");
    }

    #[test]
    fn test_bad_overrides_are_skipped() {
        let env = vars(&[
            ("WIDGETRY_STORAGE", "cloud"),
            ("WIDGETRY_THOUSANDS_SEPARATOR", "ab"),
        ]);
        let mut config = WidgetryConfig::default();
        config.apply_overrides(|name| env.get(name).cloned());

        assert_eq!(config, WidgetryConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_separator() {
        let mut config = WidgetryConfig::default();
        config.display.thousands_separator = '.';
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.display.thousands_separator = '7';
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.display.thousands_separator = '-';
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_bad_date_format() {
        let mut config = WidgetryConfig::default();
        config.display.date_format = String::new();
        assert!(config.validate().is_err());

        config.display.date_format = "%Q".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!(" FILE ".parse::<StorageBackend>().unwrap(), StorageBackend::File);
        assert!("redis".parse::<StorageBackend>().is_err());
        assert_eq!(StorageBackend::Memory.to_string(), "memory");
    }

    #[test]
    fn test_config_serialization() {
        let config = WidgetryConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[storage]"));
        assert!(toml_str.contains("[display]"));
    }
}
