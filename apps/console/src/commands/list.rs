//! # Item List Commands

use std::fmt::Write;
use widgetry_core::{ItemDescriptor, NewItem};

/// Shown instead of an empty list.
pub const EMPTY_LIST: &str = "No items yet.";

/// Parses `<title> | <description> | <value>`. Every part is optional.
pub fn parse_fields(rest: &str) -> NewItem {
    let mut parts = rest.splitn(3, '|').map(|part| part.to_string());
    NewItem {
        title: parts.next(),
        description: parts.next(),
        value: parts.next(),
    }
    .normalized()
}

/// Draws the list as text, one block per record.
///
/// ```text
/// #1760870400000  Buy milk  (Oct 19, 2026)
///     Two litres
///     Value: 2.50
///     [Delete] remove 1760870400000
/// ```
pub fn render(items: &[ItemDescriptor]) -> String {
    if items.is_empty() {
        return EMPTY_LIST.to_string();
    }

    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "#{}  {}  ({})", item.id, item.title, item.date);
        let _ = writeln!(out, "    {}", item.description);
        if let Some(value) = &item.value {
            let _ = writeln!(out, "    Value: {}", value);
        }
        let _ = write!(out, "    [{}] remove {}", item.delete_label, item.id);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(id: u64, value: Option<&str>) -> ItemDescriptor {
        ItemDescriptor {
            id,
            title: "Buy milk".to_string(),
            date: "Oct 19, 2026".to_string(),
            description: "No description".to_string(),
            value: value.map(str::to_string),
            delete_label: "Delete".to_string(),
        }
    }

    #[test]
    fn test_parse_fields() {
        let fields = parse_fields(" Buy milk | Two litres | 2.50 ");
        assert_eq!(fields.title.as_deref(), Some("Buy milk"));
        assert_eq!(fields.description.as_deref(), Some("Two litres"));
        assert_eq!(fields.value.as_deref(), Some("2.50"));
    }

    #[test]
    fn test_parse_fields_blank_parts_are_absent() {
        let fields = parse_fields("Buy milk |  | ");
        assert_eq!(fields, NewItem::titled("Buy milk"));
        assert_eq!(parse_fields(""), NewItem::default());
    }

    #[test]
    fn test_value_keeps_extra_pipes() {
        let fields = parse_fields("a | b | c | d");
        assert_eq!(fields.value.as_deref(), Some("c | d"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]), EMPTY_LIST);
    }

    #[test]
    fn test_render_blocks() {
        let text = render(&[descriptor(2, Some("3")), descriptor(1, None)]);
        assert!(text.starts_with("#2  Buy milk  (Oct 19, 2026)"));
        assert!(text.contains("    Value: 3"));
        assert_eq!(text.matches("Value:").count(), 1);
        assert!(text.ends_with("[Delete] remove 1"));
    }
}
