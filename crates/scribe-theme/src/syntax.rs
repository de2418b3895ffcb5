//! Syntax token kinds and their colors.
//!
//! Highlighters classify text into a small, closed set of [`TokenKind`]s.
//! A [`SyntaxColors`] table maps each kind to an optional color; a kind
//! with no color is drawn in the theme's foreground.

use std::fmt;

use scribe_paint::color::Color;

// ---------------------------------------------------------------------------
// TokenKind
// ---------------------------------------------------------------------------

/// Classification of a highlighted run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenKind {
    Keyword,
    String,
    Number,
    Comment,
    /// Attributes and annotations (`#[derive]`, `@Override`).
    Annotation,
    Type,
    /// Function and method names, macros.
    Method,
    Operator,
    /// Anything the highlighter left unclassified.
    #[default]
    Plain,
}

impl TokenKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 9] = [
        Self::Keyword,
        Self::String,
        Self::Number,
        Self::Comment,
        Self::Annotation,
        Self::Type,
        Self::Method,
        Self::Operator,
        Self::Plain,
    ];

    /// Lowercase name, as used in configuration keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::String => "string",
            Self::Number => "number",
            Self::Comment => "comment",
            Self::Annotation => "annotation",
            Self::Type => "type",
            Self::Method => "method",
            Self::Operator => "operator",
            Self::Plain => "plain",
        }
    }

    /// Inverse of [`name`](Self::name).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// SyntaxColors
// ---------------------------------------------------------------------------

/// Color per token kind. `None` means "use the foreground color".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxColors {
    colors: [Option<Color>; 9],
}

impl SyntaxColors {
    /// A table with no colors set.
    #[must_use]
    pub const fn empty() -> Self {
        Self { colors: [None; 9] }
    }

    /// Build a table from `(kind, color)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(TokenKind, Color)]) -> Self {
        let mut table = Self::empty();
        for &(kind, color) in pairs {
            table.set(kind, Some(color));
        }
        table
    }

    #[must_use]
    pub const fn get(&self, kind: TokenKind) -> Option<Color> {
        self.colors[kind.index()]
    }

    pub const fn set(&mut self, kind: TokenKind, color: Option<Color>) {
        self.colors[kind.index()] = color;
    }

    /// The color to draw `kind` in, falling back to `foreground`.
    #[must_use]
    pub fn resolve(&self, kind: TokenKind, foreground: Color) -> Color {
        self.get(kind).unwrap_or(foreground)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in TokenKind::ALL {
            assert_eq!(TokenKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(TokenKind::from_name("bogus"), None);
    }

    #[test]
    fn all_covers_every_index() {
        for (i, kind) in TokenKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn resolve_falls_back_to_foreground() {
        let fg = Color::rgb(1, 2, 3);
        let kw = Color::rgb(200, 100, 50);
        let table = SyntaxColors::from_pairs(&[(TokenKind::Keyword, kw)]);
        assert_eq!(table.resolve(TokenKind::Keyword, fg), kw);
        assert_eq!(table.resolve(TokenKind::Comment, fg), fg);
    }

    #[test]
    fn set_clears_with_none() {
        let mut table = SyntaxColors::from_pairs(&[(TokenKind::Type, Color::WHITE)]);
        table.set(TokenKind::Type, None);
        assert_eq!(table, SyntaxColors::empty());
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(TokenKind::Annotation.to_string(), "annotation");
    }
}
