//! # Host Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Widgetry                               │
//! │                                                                         │
//! │  stdin line                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Command::from_str ── unknown command / bad id ──► AppError(Usage)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Command::execute                                                       │
//! │       │                                                                 │
//! │       ├── StoreError (write failed) ────────────► AppError(Storage)    │
//! │       ├── CoreError (bad theme, bad pattern) ───► AppError(Validation) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Render output ──► stdout                                               │
//! │                                                                         │
//! │  AppError is printed as "error[CODE]: message" and the loop goes on.   │
//! │  Startup failures (config, storage open) end the process via anyhow.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;
use widgetry_core::CoreError;
use widgetry_store::StoreError;

use crate::state::config::ConfigError;

/// Error reported back to the console user.
///
/// ## Serialization
/// Serialized form, for hosts that report errors as JSON:
/// ```json
/// {
///   "code": "STORAGE_ERROR",
///   "message": "Storage unavailable: quota exceeded"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input line could not be parsed
    Usage,

    /// Input parsed but a value was rejected
    ValidationError,

    /// Referenced record does not exist
    NotFound,

    /// Persisting widget state failed
    StorageError,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Usage => "USAGE",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Usage, message)
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts storage errors to host errors.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(e) => AppError::from(e),
            StoreError::Serialization(e) => {
                tracing::error!("Encoding widget state failed: {}", e);
                AppError::new(ErrorCode::Internal, "Could not encode widget state")
            }
            other => AppError::new(ErrorCode::StorageError, other.to_string()),
        }
    }
}

/// Converts core errors to host errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Serialization(e) => {
                tracing::error!("Encoding widget state failed: {}", e);
                AppError::new(ErrorCode::Internal, "Could not encode widget state")
            }
            other => AppError::validation(other.to_string()),
        }
    }
}

/// Converts configuration errors to host errors.
impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = AppError::not_found("Item", "42");
        assert_eq!(err.to_string(), "error[NOT_FOUND]: Item not found: 42");
    }

    #[test]
    fn test_store_error_mapping() {
        let err: AppError = StoreError::Unavailable("quota exceeded".into()).into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(err.message.contains("quota exceeded"));

        let nested: AppError = StoreError::Core(CoreError::UnknownTheme("neon".into())).into();
        assert_eq!(nested.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_config_error_mapping() {
        let err: AppError = ConfigError::Invalid("bad".into()).into();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(AppError::usage("unknown command")).unwrap();
        assert_eq!(json["code"], "USAGE");
        assert_eq!(json["message"], "unknown command");
    }
}
