//! # Error Types
//!
//! Domain-specific error types for widgetry-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  widgetry-core errors (this file)                                      │
//! │  ├── ComputeError  - Calculator failures, kept as DATA in the display  │
//! │  └── CoreError     - Parsing and serialization failures                │
//! │                                                                         │
//! │  widgetry-store errors (separate crate)                                │
//! │  └── StoreError    - Storage read/write failures                       │
//! │                                                                         │
//! │  Flow: CoreError → StoreError → host prints the message                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Invalid calculator input is never an error, it is ignored
//! 3. `ComputeError` is rendered, never propagated with `?`

use thiserror::Error;

// =============================================================================
// Compute Error
// =============================================================================

/// A calculation that produced no number.
///
/// The calculator stores this in place of the current operand. Its
/// `Display` output is exactly what the renderer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ComputeError {
    /// Right-hand operand of a division was zero.
    #[error("Error: Div/0")]
    DivByZero,

    /// The result does not fit in an `f64`.
    #[error("Error: Overflow")]
    Overflow,
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by parsing and serialization helpers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Text does not name a calculator operator.
    #[error("Unknown operator: '{0}'. Valid options: + - * /")]
    UnknownOperator(String),

    /// Text does not name a theme.
    #[error("Unknown theme: '{0}'. Valid options: light, dark")]
    UnknownTheme(String),

    /// A `strftime` pattern that chrono cannot render.
    #[error("Invalid date format: '{0}'")]
    InvalidDateFormat(String),

    /// The item list could not be converted to or from JSON.
    #[error("Item list serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
