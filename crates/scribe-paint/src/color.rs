// SPDX-License-Identifier: MIT
//
// sRGB colors with straight (non-premultiplied) alpha.
//
// Widget painting never does color math beyond picking a value, so colors
// are stored as four bytes and handed to the surface unchanged. Hex strings
// are the interchange format for configuration files.

use std::fmt;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An 8-bit-per-channel sRGB color with alpha.
///
/// ```
/// use scribe_paint::color::Color;
///
/// let c = Color::hex("#2b2b2b").unwrap();
/// assert_eq!(c, Color::rgb(43, 43, 43));
/// assert_eq!(c.to_string(), "#2b2b2b");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// An opaque color.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color with explicit alpha.
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex string.
    ///
    /// Supports `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, with or without
    /// the leading `#`. Returns `None` for anything else.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    /// Same color with a different alpha.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    #[inline]
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        let Self { r, g, b, a } = self;
        if self.is_opaque() {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Default for Color {
    /// Opaque black.
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Hex parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        3 | 4 => {
            let nibble = |i: usize| parse_hex_digit(bytes[i]).map(|v| v << 4 | v);
            let a = if bytes.len() == 4 { nibble(3)? } else { 255 };
            Some(Color::rgba(nibble(0)?, nibble(1)?, nibble(2)?, a))
        }
        6 | 8 => {
            let byte = |i: usize| parse_hex_byte(&bytes[i..i + 2]);
            let a = if bytes.len() == 8 { byte(6)? } else { 255 };
            Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, a))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_six_digit() {
        assert_eq!(Color::hex("#212183"), Some(Color::rgb(0x21, 0x21, 0x83)));
        assert_eq!(Color::hex("bbbbbb"), Some(Color::rgb(187, 187, 187)));
    }

    #[test]
    fn parse_short_forms_expand_nibbles() {
        assert_eq!(Color::hex("#fa0"), Some(Color::rgb(0xff, 0xaa, 0x00)));
        assert_eq!(Color::hex("#fa08"), Some(Color::rgba(0xff, 0xaa, 0x00, 0x88)));
    }

    #[test]
    fn parse_with_alpha() {
        assert_eq!(Color::hex("#10203040"), Some(Color::rgba(0x10, 0x20, 0x30, 0x40)));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Color::hex("#ABCDEF"), Color::hex("#abcdef"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Color::hex(""), None);
        assert_eq!(Color::hex("#12345"), None);
        assert_eq!(Color::hex("#gggggg"), None);
        assert_eq!(Color::hex("#ééé"), None);
    }

    #[test]
    fn hex_round_trips() {
        let c = Color::rgb(255, 128, 64);
        assert_eq!(c.to_hex(), "#ff8040");
        assert_eq!(Color::hex(&c.to_hex()), Some(c));

        let t = c.with_alpha(0x7f);
        assert_eq!(t.to_hex(), "#ff80407f");
        assert_eq!(Color::hex(&t.to_hex()), Some(t));
    }

    #[test]
    fn debug_shows_hex() {
        assert_eq!(format!("{:?}", Color::WHITE), "Color(#ffffff)");
    }
}
