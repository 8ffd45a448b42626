//! # Storage Error Types
//!
//! Error types for key-value storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / CoreError                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path and a category          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Host prints the message; the widget keeps its in-memory state         │
//! │                                                                         │
//! │  EXCEPTION: loading the item list never surfaces a StoreError.         │
//! │  A bad blob degrades to an empty list.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;
use widgetry_core::CoreError;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    ///
    /// ## When This Occurs
    /// - Parent directory cannot be created
    /// - File permissions issue
    /// - Disk full
    #[error("Storage I/O failed at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("Storage file {} is corrupt: {reason}", .path.display())]
    CorruptFile { path: PathBuf, reason: String },

    /// The backend refuses the operation (e.g. storage disabled or full).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Encoding a value failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A core helper failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates an Io error tagged with the file it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = StoreError::io(
            "/tmp/widgetry.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "Storage I/O failed at /tmp/widgetry.json: denied"
        );
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: StoreError = CoreError::UnknownTheme("x".to_string()).into();
        assert_eq!(err.to_string(), "Unknown theme: 'x'. Valid options: light, dark");
    }
}
