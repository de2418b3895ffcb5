//! Builtin themes.
//!
//! `light` is a neutral paper-white scheme; `dark` is a charcoal scheme in
//! the style of JetBrains' Darcula. `default` is an alias for `light`.

use scribe_paint::color::Color;

use crate::syntax::{SyntaxColors, TokenKind};
use crate::theme::{Theme, ThemeColors};

/// Look up a builtin theme by name.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn builtin_theme(name: &str) -> Option<Theme> {
    match name {
        "default" | "light" => Some(light()),
        "dark" => Some(dark()),
        _ => None,
    }
}

/// List all available builtin theme names.
#[must_use]
pub const fn builtin_names() -> &'static [&'static str] {
    &["default", "light", "dark"]
}

fn light() -> Theme {
    Theme {
        name: "light".to_string(),
        is_dark: false,
        colors: ThemeColors {
            background: Color::rgb(250, 250, 250),
            foreground: Color::rgb(30, 30, 30),
            selection: Color::rgb(164, 191, 236),
            caret: Color::rgb(30, 30, 30),
            scroll_bar: Color::rgb(205, 205, 205),
            scroll_bar_hover: Color::rgb(190, 190, 190),
            scroll_bar_drag: Color::rgb(172, 172, 172),
            scroll_bar_background: Color::rgb(245, 245, 245),
            line_numbers_text: Color::rgb(110, 110, 110),
            line_numbers_background: Color::rgb(250, 250, 250),
        },
        syntax: SyntaxColors::from_pairs(&[
            (TokenKind::Keyword, Color::rgb(204, 120, 50)),
            (TokenKind::String, Color::rgb(98, 151, 85)),
            (TokenKind::Number, Color::rgb(104, 151, 187)),
            (TokenKind::Comment, Color::rgb(128, 128, 128)),
            (TokenKind::Annotation, Color::rgb(191, 139, 38)),
            (TokenKind::Type, Color::rgb(178, 178, 178)),
            (TokenKind::Method, Color::rgb(255, 198, 109)),
            (TokenKind::Operator, Color::rgb(204, 120, 50)),
            (TokenKind::Plain, Color::rgb(0, 0, 0)),
        ]),
    }
}

fn dark() -> Theme {
    Theme {
        name: "dark".to_string(),
        is_dark: true,
        colors: ThemeColors {
            background: Color::rgb(43, 43, 43),
            foreground: Color::rgb(187, 187, 187),
            selection: Color::rgb(33, 66, 131),
            caret: Color::rgb(187, 187, 187),
            scroll_bar: Color::rgb(85, 85, 85),
            scroll_bar_hover: Color::rgb(100, 100, 100),
            scroll_bar_drag: Color::rgb(110, 110, 110),
            scroll_bar_background: Color::rgb(49, 49, 49),
            line_numbers_text: Color::rgb(145, 145, 145),
            line_numbers_background: Color::rgb(43, 43, 43),
        },
        syntax: SyntaxColors::from_pairs(&[
            (TokenKind::Keyword, Color::rgb(255, 128, 64)),
            (TokenKind::String, Color::rgb(106, 168, 79)),
            (TokenKind::Number, Color::rgb(104, 151, 187)),
            (TokenKind::Comment, Color::rgb(128, 128, 128)),
            (TokenKind::Annotation, Color::rgb(255, 198, 109)),
            (TokenKind::Type, Color::rgb(169, 183, 198)),
            (TokenKind::Method, Color::rgb(255, 198, 109)),
            (TokenKind::Operator, Color::rgb(255, 128, 64)),
            (TokenKind::Plain, Color::rgb(235, 235, 235)),
        ]),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_builtins_resolve() {
        for name in builtin_names() {
            assert!(builtin_theme(name).is_some(), "Builtin '{name}' missing");
        }
    }

    #[test]
    fn unknown_returns_none() {
        assert!(builtin_theme("solarized").is_none());
    }

    #[test]
    fn default_is_light() {
        assert_eq!(builtin_theme("default"), builtin_theme("light"));
    }

    #[test]
    fn dark_is_dark() {
        let t = builtin_theme("dark").unwrap();
        assert!(t.is_dark);
        assert_eq!(t.colors.background, Color::rgb(43, 43, 43));
    }

    #[test]
    fn every_token_kind_has_a_color() {
        for name in ["light", "dark"] {
            let t = builtin_theme(name).unwrap();
            for kind in TokenKind::ALL {
                assert!(t.syntax.get(kind).is_some(), "{name}: {kind} unset");
            }
        }
    }

    #[test]
    fn selection_differs_from_background() {
        for name in ["light", "dark"] {
            let t = builtin_theme(name).unwrap();
            assert_ne!(t.colors.selection, t.colors.background);
        }
    }
}
