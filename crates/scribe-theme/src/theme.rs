//! Theme assembly: UI colors plus a syntax palette.

use scribe_paint::color::Color;

use crate::syntax::{SyntaxColors, TokenKind};

// ---------------------------------------------------------------------------
// ThemeColors
// ---------------------------------------------------------------------------

/// Colors for every painted element of the text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub background: Color,
    pub foreground: Color,
    pub selection: Color,
    pub caret: Color,

    // ── Scroll bars ───────────────────────────────────────────
    pub scroll_bar: Color,
    pub scroll_bar_hover: Color,
    pub scroll_bar_drag: Color,
    pub scroll_bar_background: Color,

    // ── Line number gutter ────────────────────────────────────
    pub line_numbers_text: Color,
    pub line_numbers_background: Color,
}

impl ThemeColors {
    /// Field names, as used in configuration keys.
    pub const FIELDS: [&'static str; 10] = [
        "background",
        "foreground",
        "selection",
        "caret",
        "scroll_bar",
        "scroll_bar_hover",
        "scroll_bar_drag",
        "scroll_bar_background",
        "line_numbers_text",
        "line_numbers_background",
    ];

    /// Mutable access to a field by configuration name.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Color> {
        Some(match name {
            "background" => &mut self.background,
            "foreground" => &mut self.foreground,
            "selection" => &mut self.selection,
            "caret" => &mut self.caret,
            "scroll_bar" => &mut self.scroll_bar,
            "scroll_bar_hover" => &mut self.scroll_bar_hover,
            "scroll_bar_drag" => &mut self.scroll_bar_drag,
            "scroll_bar_background" => &mut self.scroll_bar_background,
            "line_numbers_text" => &mut self.line_numbers_text,
            "line_numbers_background" => &mut self.line_numbers_background,
            _ => return None,
        })
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// A named, complete color scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub is_dark: bool,
    pub colors: ThemeColors,
    pub syntax: SyntaxColors,
}

impl Theme {
    /// The color a token of `kind` is drawn in.
    #[must_use]
    pub fn token_color(&self, kind: TokenKind) -> Color {
        self.syntax.resolve(kind, self.colors.foreground)
    }
}
