//! # Calculator Module
//!
//! The four-function calculator as an explicit state machine.
//!
//! ## Input Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Calculator Transitions                               │
//! │                                                                         │
//! │  Input Adapter            CalculatorEvent          State Change         │
//! │  ─────────────            ───────────────          ────────────         │
//! │                                                                         │
//! │  "7" key ────────────────► Digit('7') ───────────► current += "7"      │
//! │                                                                         │
//! │  "." key ────────────────► Point ────────────────► current += "."      │
//! │                                                    (once per operand)   │
//! │                                                                         │
//! │  "+" key ────────────────► Operator(Add) ────────► fold pending op,    │
//! │                                                    previous = current   │
//! │                                                                         │
//! │  Enter / "=" ────────────► Equals ───────────────► current = result    │
//! │                                                    awaiting_reset=true  │
//! │                                                                         │
//! │  Escape ─────────────────► Clear ────────────────► back to "0"         │
//! │                                                                         │
//! │  Backspace ──────────────► Delete ───────────────► drop last char      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Running Accumulator
//! Operators are folded strictly left to right as they are chosen:
//! `1 + 2 × 3 =` is `(1 + 2) × 3 = 9`. There is no precedence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{ComputeError, CoreError};
use crate::format::NumberFormat;

/// Results are rounded to this many fractional digits.
pub const MAX_FRACTION_DIGITS: i32 = 10;

// =============================================================================
// Operator
// =============================================================================

/// A binary operator the user can stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Symbol shown next to the previous operand.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "−",
            Operator::Mul => "×",
            Operator::Div => "÷",
        }
    }

    /// Applies the operator to two parsed operands.
    ///
    /// ## Example
    /// ```rust
    /// use widgetry_core::{Evaluation, Operator};
    ///
    /// assert_eq!(Operator::Mul.apply(6.0, 7.0), Evaluation::Value(42.0));
    /// assert_eq!(Operator::Div.apply(6.0, 0.0), Evaluation::DivByZero);
    /// ```
    pub fn apply(&self, lhs: f64, rhs: f64) -> Evaluation {
        match self {
            Operator::Add => Evaluation::Value(lhs + rhs),
            Operator::Sub => Evaluation::Value(lhs - rhs),
            Operator::Mul => Evaluation::Value(lhs * rhs),
            Operator::Div if rhs == 0.0 => Evaluation::DivByZero,
            Operator::Div => Evaluation::Value(lhs / rhs),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Operator::Add),
            "-" | "−" => Ok(Operator::Sub),
            "*" | "x" | "×" => Ok(Operator::Mul),
            "/" | "÷" => Ok(Operator::Div),
            other => Err(CoreError::UnknownOperator(other.to_string())),
        }
    }
}

// =============================================================================
// Evaluation
// =============================================================================

/// Outcome of applying an operator.
///
/// Division by zero is a value of this type, not a panic or an `Err`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    Value(f64),
    DivByZero,
}

impl Evaluation {
    /// Converts the outcome into what the calculator stores as its operand.
    ///
    /// Values are rounded to [`MAX_FRACTION_DIGITS`] fractional digits and
    /// written as the shortest decimal text. Non-finite values become
    /// [`ComputeError::Overflow`].
    pub fn into_entry(self) -> Entry {
        match self {
            Evaluation::DivByZero => Entry::Error(ComputeError::DivByZero),
            Evaluation::Value(value) if !value.is_finite() => Entry::Error(ComputeError::Overflow),
            Evaluation::Value(value) => Entry::Text(operand_text(round_fraction(value))),
        }
    }
}

/// Rounds half away from zero at [`MAX_FRACTION_DIGITS`] fractional digits.
fn round_fraction(value: f64) -> f64 {
    let scale = 10f64.powi(MAX_FRACTION_DIGITS);
    let scaled = value * scale;
    if !scaled.is_finite() {
        // Already too large to carry fractional digits.
        return value;
    }
    scaled.round() / scale
}

fn operand_text(value: f64) -> String {
    // -0 renders as "0"
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

fn parse_operand(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

// =============================================================================
// Entry
// =============================================================================

/// What the current operand slot holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Operand text as typed or as produced by a computation.
    Text(String),

    /// The last computation failed; shown until the next input.
    Error(ComputeError),
}

impl Entry {
    /// Returns the operand text, or `None` for an error.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entry::Text(text) => Some(text),
            Entry::Error(_) => None,
        }
    }

    /// Returns true for an error entry.
    pub fn is_error(&self) -> bool {
        matches!(self, Entry::Error(_))
    }
}

impl Default for Entry {
    fn default() -> Self {
        Entry::Text("0".to_string())
    }
}

// =============================================================================
// Calculator State
// =============================================================================

/// The four fields the calculator's behaviour depends on.
///
/// ## Invariants
/// - `current` text holds at most one `.`
/// - `previous` is empty exactly when nothing is staged
/// - `awaiting_reset` is set right after a computation completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorState {
    /// Operand being entered.
    pub current: Entry,

    /// Operand captured when the operator was chosen.
    pub previous: String,

    /// Operator waiting for its right-hand operand.
    pub operator: Option<Operator>,

    /// Next digit starts a fresh operand instead of appending.
    pub awaiting_reset: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        CalculatorState {
            current: Entry::default(),
            previous: String::new(),
            operator: None,
            awaiting_reset: false,
        }
    }
}

impl CalculatorState {
    fn append_digit(&mut self, token: char) {
        if !(token.is_ascii_digit() || token == '.') {
            return;
        }

        if self.awaiting_reset {
            self.current = Entry::Text(String::new());
            self.awaiting_reset = false;
        }

        if self.current.is_error() {
            self.current = Entry::Text(String::new());
        }
        let Entry::Text(current) = &mut self.current else {
            return;
        };

        if token == '.' && current.contains('.') {
            return;
        }

        if current == "0" && token != '.' {
            current.clear();
        }
        current.push(token);
    }

    fn choose_operator(&mut self, op: Operator) {
        match &self.current {
            Entry::Text(text) if !text.is_empty() => {}
            _ => return,
        }

        if !self.previous.is_empty() {
            self.compute();
            if self.current.is_error() {
                return;
            }
        }

        let current = std::mem::replace(&mut self.current, Entry::Text(String::new()));
        if let Entry::Text(text) = current {
            self.previous = text;
        }
        self.operator = Some(op);
    }

    fn compute(&mut self) {
        let Some(op) = self.operator else {
            return;
        };
        let Some(lhs) = parse_operand(&self.previous) else {
            return;
        };
        let Some(rhs) = self.current.as_text().and_then(parse_operand) else {
            return;
        };

        self.current = op.apply(lhs, rhs).into_entry();
        self.operator = None;
        self.previous.clear();
        self.awaiting_reset = true;
    }

    fn clear(&mut self) {
        self.current = Entry::default();
        self.previous.clear();
        self.operator = None;
    }

    fn delete_last(&mut self) {
        match &mut self.current {
            Entry::Text(text) if text.chars().count() != 1 => {
                text.pop();
            }
            _ => self.current = Entry::default(),
        }
    }
}

// =============================================================================
// Events & Transitions
// =============================================================================

/// A discrete input token delivered by the input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorEvent {
    /// One of `'0'..='9'`.
    Digit(char),
    Point,
    Operator(Operator),
    Equals,
    Clear,
    Delete,
}

impl CalculatorEvent {
    /// Maps a keyboard key name to an event.
    ///
    /// ## Key Map
    /// ```text
    /// 0-9            → Digit
    /// .              → Point
    /// + - * / × ÷    → Operator
    /// Enter, =       → Equals
    /// Backspace      → Delete
    /// Escape, Delete → Clear
    /// ```
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "." => Some(CalculatorEvent::Point),
            "Enter" | "=" => Some(CalculatorEvent::Equals),
            "Backspace" => Some(CalculatorEvent::Delete),
            "Escape" | "Delete" => Some(CalculatorEvent::Clear),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Some(CalculatorEvent::Digit(c)),
                    _ => key.parse().ok().map(CalculatorEvent::Operator),
                }
            }
        }
    }
}

/// Whether an operation changed the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed,
    /// Input was invalid in the current state and had no effect.
    Ignored,
}

impl Transition {
    pub fn is_changed(&self) -> bool {
        matches!(self, Transition::Changed)
    }
}

/// Both display lines, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorDisplay {
    /// Previous operand and staged operator symbol, or empty.
    pub previous: String,

    /// Current operand or error text.
    pub current: String,
}

// =============================================================================
// Calculator
// =============================================================================

/// The calculator engine.
///
/// Owned by the host; create as many independent instances as needed.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    state: CalculatorState,
    format: NumberFormat,
}

impl Calculator {
    /// Creates a calculator showing `"0"` with comma grouping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator that formats with the given rules.
    pub fn with_format(format: NumberFormat) -> Self {
        Calculator {
            state: CalculatorState::default(),
            format,
        }
    }

    /// Read access to the raw state.
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Dispatches one input event.
    pub fn handle(&mut self, event: CalculatorEvent) -> Transition {
        match event {
            CalculatorEvent::Digit(digit) => self.append_digit(digit),
            CalculatorEvent::Point => self.append_digit('.'),
            CalculatorEvent::Operator(op) => self.choose_operator(op),
            CalculatorEvent::Equals => self.compute(),
            CalculatorEvent::Clear => self.clear(),
            CalculatorEvent::Delete => self.delete_last(),
        }
    }

    /// Appends a digit or decimal point to the current operand.
    ///
    /// ## Rules
    /// - After a computation, the operand is cleared first
    /// - A second `.` is ignored
    /// - `"0"` followed by a digit is replaced, not appended
    /// - Any other character is ignored
    pub fn append_digit(&mut self, token: char) -> Transition {
        self.track(|state| state.append_digit(token))
    }

    /// Stages an operator, folding any pending one first.
    ///
    /// Ignored while the current operand is empty or an error.
    pub fn choose_operator(&mut self, op: Operator) -> Transition {
        self.track(|state| state.choose_operator(op))
    }

    /// Applies the staged operator to both operands.
    ///
    /// Ignored when nothing is staged or either operand does not parse.
    pub fn compute(&mut self) -> Transition {
        self.track(CalculatorState::compute)
    }

    /// Resets operands and operator. Leaves `awaiting_reset` alone.
    pub fn clear(&mut self) -> Transition {
        self.track(CalculatorState::clear)
    }

    /// Removes the last character; a single character or error becomes `"0"`.
    pub fn delete_last(&mut self) -> Transition {
        self.track(CalculatorState::delete_last)
    }

    /// Projects the state onto the two display lines.
    pub fn display(&self) -> CalculatorDisplay {
        let previous = match self.state.operator {
            Some(op) => format!("{} {}", self.format.format_operand(&self.state.previous), op),
            None => String::new(),
        };

        CalculatorDisplay {
            previous,
            current: self.format.format_entry(&self.state.current),
        }
    }

    fn track<F>(&mut self, f: F) -> Transition
    where
        F: FnOnce(&mut CalculatorState),
    {
        let before = self.state.clone();
        f(&mut self.state);
        if before == self.state {
            Transition::Ignored
        } else {
            Transition::Changed
        }
    }
}
