// SPDX-License-Identifier: MIT
//
// Font measurement.
//
// The editor never lays text out itself: every horizontal position is the
// running sum of `char_width` over the characters before it, and every
// vertical position is a multiple of `line_height`. A backend supplies these
// numbers from its real font; `MonospaceMetrics` supplies them from
// Unicode East Asian Width data for fixed-pitch output.

use unicode_width::UnicodeWidthChar;

/// Pixel measurements for the font used to draw buffer text.
pub trait FontMetrics {
    /// Advance width of one character in pixels.
    fn char_width(&self, ch: char) -> i32;

    /// Distance between consecutive baselines.
    fn line_height(&self) -> i32;

    /// Distance from the top of a line box to its baseline.
    fn ascent(&self) -> i32;

    /// Advance width of a run of characters.
    fn text_width(&self, text: &str) -> i32 {
        text.chars().map(|ch| self.char_width(ch)).sum()
    }
}

// ─── MonospaceMetrics ────────────────────────────────────────────────────────

/// Fixed-pitch metrics: every column is `cell_width` pixels.
///
/// Wide (CJK, emoji) characters take two columns, zero-width and control
/// characters take none, and a tab takes `tab_width` columns.
///
/// ```
/// use scribe_paint::metrics::{FontMetrics, MonospaceMetrics};
///
/// let m = MonospaceMetrics::new(8, 16, 12);
/// assert_eq!(m.text_width("ab"), 16);
/// assert_eq!(m.text_width("中"), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMetrics {
    cell_width: i32,
    line_height: i32,
    ascent: i32,
    tab_width: i32,
}

impl MonospaceMetrics {
    /// Default number of columns a tab advances.
    pub const DEFAULT_TAB_WIDTH: i32 = 4;

    #[must_use]
    pub const fn new(cell_width: i32, line_height: i32, ascent: i32) -> Self {
        Self {
            cell_width,
            line_height,
            ascent,
            tab_width: Self::DEFAULT_TAB_WIDTH,
        }
    }

    /// One pixel per cell, baseline at the top of the cell.
    ///
    /// Pairs with [`GridSurface`](crate::grid::GridSurface), where a pixel
    /// is a terminal cell.
    #[must_use]
    pub const fn cell() -> Self {
        Self::new(1, 1, 0)
    }

    #[must_use]
    pub const fn with_tab_width(mut self, columns: i32) -> Self {
        self.tab_width = columns;
        self
    }

    #[inline]
    #[must_use]
    pub const fn cell_width(&self) -> i32 {
        self.cell_width
    }

    #[inline]
    #[must_use]
    pub const fn tab_width(&self) -> i32 {
        self.tab_width
    }

    /// Width of `ch` in columns.
    #[must_use]
    pub fn columns(&self, ch: char) -> i32 {
        if ch == '\t' {
            return self.tab_width;
        }
        // Widths are 0, 1 or 2.
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let w = ch.width().unwrap_or(0) as i32;
        w
    }
}

impl FontMetrics for MonospaceMetrics {
    fn char_width(&self, ch: char) -> i32 {
        self.columns(ch) * self.cell_width
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }

    fn ascent(&self) -> i32 {
        self.ascent
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::cell()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
