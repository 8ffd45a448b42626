//! # Theme Commands

use widgetry_core::Theme;

/// Draws the current theme and the toggle button.
pub fn render(theme: Theme) -> String {
    format!(
        "Theme: {} (root class: {})\n[{}]",
        theme,
        theme.root_class().unwrap_or("none"),
        theme.toggle_label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_light() {
        assert_eq!(render(Theme::Light), "Theme: light (root class: none)\n[Dark mode]");
    }

    #[test]
    fn test_render_dark() {
        assert_eq!(
            render(Theme::Dark),
            "Theme: dark (root class: dark-mode)\n[Light mode]"
        );
    }
}
