//! Pomodoro colour themes

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub bg: &'static str,
    pub panel: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
}

pub const DEFAULT_THEME: &str = "Pastel Orange";

pub const THEMES: [(&str, ThemeColors); 4] = [
    (
        "Pastel Blue",
        ThemeColors {
            bg: "#D8E9FF",
            panel: "#BED9FF",
            accent: "#5B8DEF",
            text: "#112542",
        },
    ),
    (
        "Pastel Pink",
        ThemeColors {
            bg: "#FFE4EF",
            panel: "#FFD1E4",
            accent: "#FF7AA2",
            text: "#3F0D21",
        },
    ),
    (
        "Pastel Orange",
        ThemeColors {
            bg: "#FFF0DC",
            panel: "#FFE2C4",
            accent: "#FF9B42",
            text: "#3D1F0F",
        },
    ),
    (
        "Pastel Red",
        ThemeColors {
            bg: "#FFE1E1",
            panel: "#FFCACA",
            accent: "#FF6B6B",
            text: "#3D0F0F",
        },
    ),
];

pub fn theme_names() -> impl Iterator<Item = &'static str> {
    THEMES.iter().map(|(name, _)| *name)
}

/// Canonical name of a theme, or the default for anything unknown
pub fn resolve_theme_name(name: &str) -> &'static str {
    THEMES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(known, _)| *known)
        .unwrap_or(DEFAULT_THEME)
}

pub fn resolve_theme(name: &str) -> ThemeColors {
    let name = resolve_theme_name(name);
    THEMES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, colors)| *colors)
        .unwrap_or(THEMES[2].1)
}

/// Window CSS for a theme
pub fn build_stylesheet(colors: &ThemeColors) -> String {
    let ThemeColors {
        bg,
        panel,
        accent,
        text,
    } = colors;

    format!(
        r#"
.pomodoro-frame {{
    background-color: {bg};
    border: 3px solid {accent};
    border-radius: 10px;
    color: {text};
    font-family: 'Press Start 2P', 'VT323', 'Courier New', monospace;
}}
.pomodoro-frame .title {{
    color: {accent};
    font-size: 16px;
    letter-spacing: 2px;
    font-weight: bold;
}}
.pomodoro-frame .caption {{
    color: {text};
    font-size: 12px;
}}
.pomodoro-frame .time-label {{
    background-color: {panel};
    border: 3px solid {accent};
    border-radius: 8px;
    padding: 16px 12px;
    font-size: 28px;
    letter-spacing: 1px;
    color: #000000;
    text-align: center;
}}
.pomodoro-frame input[type=range] {{
    accent-color: {accent};
    background: {panel};
}}
.pomodoro-frame button {{
    background-color: {accent};
    color: {bg};
    border: 3px solid {text};
    border-radius: 8px;
    padding: 10px 14px;
    font-weight: bold;
}}
.pomodoro-frame button:hover {{
    background-color: {text};
    color: {bg};
}}
.pomodoro-frame button:active {{
    background-color: {panel};
    color: {text};
}}
.pomodoro-frame button:disabled {{
    opacity: 0.5;
}}
.pomodoro-frame button.reset {{
    background-color: {panel};
    color: {text};
}}
.pomodoro-frame button.title-button {{
    background-color: transparent;
    color: {text};
    border: 2px solid {accent};
    border-radius: 6px;
    padding: 2px 6px;
}}
.pomodoro-frame button.title-button:hover {{
    background-color: {accent};
    color: {bg};
}}
.pomodoro-frame select {{
    background-color: {panel};
    color: {text};
    border: 2px solid {accent};
    border-radius: 6px;
    padding: 6px 8px;
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_theme() {
        assert_eq!(resolve_theme_name("Pastel Blue"), "Pastel Blue");
        assert_eq!(resolve_theme("Pastel Pink").accent, "#FF7AA2");
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        assert_eq!(resolve_theme_name("pastel blue"), DEFAULT_THEME);
        assert_eq!(resolve_theme("Neon"), resolve_theme(DEFAULT_THEME));
    }

    #[test]
    fn test_stylesheet_uses_colors() {
        let css = build_stylesheet(&resolve_theme("Pastel Red"));
        assert!(css.contains("#FF6B6B"));
        assert!(css.contains("#FFE1E1"));
        assert!(css.contains(".time-label"));
    }

    #[test]
    fn test_theme_names_in_order() {
        let names: Vec<_> = theme_names().collect();
        assert_eq!(names, vec!["Pastel Blue", "Pastel Pink", "Pastel Orange", "Pastel Red"]);
    }
}
