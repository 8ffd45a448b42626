//! # Format Module
//!
//! Turns operand text into what the calculator screen shows.
//!
//! ## Formatting Is Cosmetic
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OPERAND TEXT            DISPLAY                                        │
//! │  ────────────            ───────                                        │
//! │  "1234567"        ──►    "1,234,567"      integer part grouped          │
//! │  "1234.5678"      ──►    "1,234.5678"     fraction reattached as typed  │
//! │  "12."            ──►    "12."            trailing point preserved      │
//! │  ".5"             ──►    ".5"             empty integer part stays empty│
//! │  "Error: Div/0"   ──►    "Error: Div/0"   sentinel passes through       │
//! │                                                                         │
//! │  No rounding happens here. Rounding belongs to `compute()`.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::calculator::Entry;

/// Grouping rules for the integer part of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    /// Character inserted between groups of three integer digits.
    pub thousands_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            thousands_separator: ',',
        }
    }
}

impl NumberFormat {
    /// Creates a format with the given thousands separator.
    pub const fn with_separator(thousands_separator: char) -> Self {
        NumberFormat {
            thousands_separator,
        }
    }

    /// Formats operand text for display.
    ///
    /// Text whose integer part is not a (optionally signed) run of ASCII
    /// digits is returned unchanged; this covers the error sentinels.
    ///
    /// ## Example
    /// ```rust
    /// use widgetry_core::NumberFormat;
    ///
    /// let format = NumberFormat::with_separator(' ');
    /// assert_eq!(format.format_operand("-9876543.21"), "-9 876 543.21");
    /// ```
    pub fn format_operand(&self, operand: &str) -> String {
        let (integer, fraction) = match operand.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (operand, None),
        };
        let (sign, digits) = match integer.strip_prefix('-') {
            Some(digits) => ("-", digits),
            None => ("", integer),
        };

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return operand.to_string();
        }

        let mut out = String::with_capacity(operand.len() + digits.len() / 3);
        out.push_str(sign);
        out.push_str(&self.group_digits(digits));
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }

    /// Formats a calculator entry, text or error.
    pub fn format_entry(&self, entry: &Entry) -> String {
        match entry {
            Entry::Text(text) => self.format_operand(text),
            Entry::Error(err) => err.to_string(),
        }
    }

    /// Groups a run of ASCII digits in threes, dropping leading zeros.
    fn group_digits(&self, digits: &str) -> String {
        if digits.is_empty() {
            return String::new();
        }

        let significant = digits.trim_start_matches('0');
        let significant = if significant.is_empty() { "0" } else { significant };

        let len = significant.len();
        let mut out = String::with_capacity(len + len / 3);
        for (i, c) in significant.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.thousands_separator);
            }
            out.push(c);
        }
        out
    }
}

/// Formats operand text with the default (comma) grouping.
///
/// ## Example
/// ```rust
/// use widgetry_core::format_for_display;
///
/// assert_eq!(format_for_display("1234.50"), "1,234.50");
/// assert_eq!(format_for_display("Error: Div/0"), "Error: Div/0");
/// ```
pub fn format_for_display(operand: &str) -> String {
    NumberFormat::default().format_operand(operand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComputeError;

    #[test]
    fn test_groups_integer_part() {
        assert_eq!(format_for_display("0"), "0");
        assert_eq!(format_for_display("999"), "999");
        assert_eq!(format_for_display("1000"), "1,000");
        assert_eq!(format_for_display("1234567"), "1,234,567");
        assert_eq!(format_for_display("-1234"), "-1,234");
    }

    #[test]
    fn test_fraction_is_reattached_unmodified() {
        assert_eq!(format_for_display("1234.5678"), "1,234.5678");
        assert_eq!(format_for_display("12."), "12.");
        assert_eq!(format_for_display("0.000"), "0.000");
        assert_eq!(format_for_display(".5"), ".5");
    }

    #[test]
    fn test_sentinel_passes_through() {
        assert_eq!(format_for_display("Error: Div/0"), "Error: Div/0");
        let entry = Entry::Error(ComputeError::DivByZero);
        assert_eq!(NumberFormat::default().format_entry(&entry), "Error: Div/0");
    }

    #[test]
    fn test_empty_operand_stays_empty() {
        assert_eq!(format_for_display(""), "");
    }

    #[test]
    fn test_leading_zeros_are_dropped() {
        assert_eq!(format_for_display("0007"), "7");
        assert_eq!(format_for_display("000"), "0");
    }

    #[test]
    fn test_custom_separator() {
        let format = NumberFormat::with_separator('\'');
        assert_eq!(format.format_operand("1234567.25"), "1'234'567.25");
    }
}
