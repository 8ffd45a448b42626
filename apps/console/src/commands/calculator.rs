//! # Calculator Commands
//!
//! `calc <tokens...>` and `key <name>` both end up here.

use tracing::debug;
use widgetry_core::{Calculator, CalculatorDisplay, CalculatorEvent};

use crate::error::{AppError, AppResult};

/// Width the display lines are right-aligned to.
pub const DISPLAY_WIDTH: usize = 24;

/// Turns one `calc` token into events.
///
/// A key name (`Enter`, `Backspace`, `+`) maps to one event. Anything else
/// is read character by character, so `12.5` and `2+3=` both work.
pub fn parse_token(token: &str) -> AppResult<Vec<CalculatorEvent>> {
    if let Some(event) = CalculatorEvent::from_key(token) {
        return Ok(vec![event]);
    }

    token
        .chars()
        .map(|c| {
            let mut buf = [0u8; 4];
            CalculatorEvent::from_key(c.encode_utf8(&mut buf))
                .ok_or_else(|| AppError::usage(format!("Unknown calculator key: '{}'", c)))
        })
        .collect()
}

/// Parses a single key name for `key <name>`.
pub fn parse_key(name: &str) -> AppResult<CalculatorEvent> {
    CalculatorEvent::from_key(name)
        .ok_or_else(|| AppError::usage(format!("Unknown calculator key: '{}'", name)))
}

/// Feeds events to the calculator in order.
pub fn apply(calculator: &mut Calculator, events: &[CalculatorEvent]) {
    for event in events {
        if !calculator.handle(*event).is_changed() {
            debug!(?event, "Calculator input ignored");
        }
    }
}

/// Draws both display lines, right-aligned like a calculator screen.
pub fn render(display: &CalculatorDisplay) -> String {
    format!(
        "{:>width$}\n{:>width$}",
        display.previous,
        display.current,
        width = DISPLAY_WIDTH
    )
}
