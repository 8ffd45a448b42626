//! # widgetry-core: Pure Widget Logic
//!
//! This crate holds the state machines behind the site's interactive
//! widgets. Everything here is deterministic and free of I/O; persistence
//! lives in `widgetry-store` and input/rendering live in the host app.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Widgetry Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Input Adapter (keys, clicks, forms)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CalculatorEvent / NewItem              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ widgetry-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌───────────┐  ┌───────────┐  ┌──────────┐   │   │
//! │  │   │ calculator │  │  format   │  │   list    │  │  theme   │   │   │
//! │  │   │ Calculator │  │ Number    │  │ ItemList  │  │  Theme   │   │   │
//! │  │   │ Operator   │  │ Format    │  │ ListItem  │  │          │   │   │
//! │  │   └────────────┘  └───────────┘  └───────────┘  └──────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK READS IN TRANSITIONS          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          widgetry-store (KeyValueStore, ItemListStore)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`calculator`] - Four-function calculator state machine
//! - [`format`] - Display formatting (thousands grouping)
//! - [`list`] - List records, id allocation, render descriptors
//! - [`theme`] - Light/dark theme preference
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use widgetry_core::calculator::{Calculator, CalculatorEvent};
//! use widgetry_core::Operator;
//!
//! let mut calc = Calculator::new();
//! calc.handle(CalculatorEvent::Digit('2'));
//! calc.handle(CalculatorEvent::Operator(Operator::Add));
//! calc.handle(CalculatorEvent::Digit('3'));
//! calc.handle(CalculatorEvent::Equals);
//!
//! assert_eq!(calc.display().current, "5");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod format;
pub mod list;
pub mod theme;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{
    Calculator, CalculatorDisplay, CalculatorEvent, Entry, Evaluation, Operator, Transition,
};
pub use error::{ComputeError, CoreError, CoreResult};
pub use format::{format_for_display, NumberFormat};
pub use list::{DateStyle, ItemDescriptor, ItemList, ListItem, NewItem};
pub use theme::Theme;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key holding the persisted theme preference.
pub const THEME_KEY: &str = "widgetry.theme";

/// Storage key holding the serialized item list.
pub const ITEMS_KEY: &str = "widgetry.items";
