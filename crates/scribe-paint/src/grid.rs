// SPDX-License-Identifier: MIT
//
// A character-cell raster.
//
// `GridSurface` treats one pixel as one terminal cell. It pairs with
// `MonospaceMetrics::cell()`, so the editor's pixel layout maps straight
// onto rows and columns and a frame can be printed as plain text or as
// 24-bit ANSI.
//
// Layout:
//
//   cells: Vec<GridCell>   (row-major, width * height)
//   index = y * width + x
//
// Wide characters occupy two cells. The second one is a continuation cell
// that renders nothing, so a row always spans exactly `width` columns.
//
// Fills only touch the background and text only touches the glyph and
// foreground. That lets a selection painted under text and a caret painted
// over it both survive in the same cell.

use std::fmt::Write as _;

use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::metrics::MonospaceMetrics;
use crate::surface::Surface;

// ─── GridCell ────────────────────────────────────────────────────────────────

/// One cell of the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    /// Right half of a wide character drawn in the cell to the left.
    pub continuation: bool,
}

impl GridCell {
    pub const BLANK: Self = Self {
        ch: ' ',
        fg: None,
        bg: None,
        continuation: false,
    };
}

impl Default for GridCell {
    fn default() -> Self {
        Self::BLANK
    }
}

// ─── GridSurface ─────────────────────────────────────────────────────────────

/// A `width × height` grid of cells implementing [`Surface`].
#[derive(Debug, Clone)]
pub struct GridSurface {
    width: i32,
    height: i32,
    cells: Vec<GridCell>,
    clips: Vec<Rect>,
    metrics: MonospaceMetrics,
}

impl GridSurface {
    /// A blank grid. Negative dimensions are treated as zero.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        #[allow(clippy::cast_sign_loss)]
        let len = (width * height) as usize;
        Self {
            width,
            height,
            cells: vec![GridCell::BLANK; len],
            clips: Vec::new(),
            metrics: MonospaceMetrics::cell(),
        }
    }

    /// Use the same tab width as the metrics the frame was laid out with.
    #[must_use]
    pub const fn with_tab_width(mut self, columns: i32) -> Self {
        self.metrics = self.metrics.with_tab_width(columns);
        self
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<&GridCell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// The glyphs of one row, continuation cells skipped.
    #[must_use]
    pub fn row_text(&self, y: i32) -> String {
        (0..self.width)
            .filter_map(|x| self.cell(x, y))
            .filter(|c| !c.continuation)
            .map(|c| c.ch)
            .collect()
    }

    /// Every row with trailing blanks trimmed, joined by `\n`.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Every row with 24-bit SGR color sequences, each row reset at its end.
    #[must_use]
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for y in 0..self.height {
            let mut fg: Option<Color> = None;
            let mut bg: Option<Color> = None;
            for x in 0..self.width {
                let Some(cell) = self.cell(x, y) else { continue };
                if cell.continuation {
                    continue;
                }
                if cell.fg != fg || cell.bg != bg {
                    out.push_str("\x1b[0m");
                    if let Some(c) = cell.fg {
                        let _ = write!(out, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b);
                    }
                    if let Some(c) = cell.bg {
                        let _ = write!(out, "\x1b[48;2;{};{};{}m", c.r, c.g, c.b);
                    }
                    fg = cell.fg;
                    bg = cell.bg;
                }
                out.push(cell.ch);
            }
            out.push_str("\x1b[0m\n");
        }
        out
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        #[allow(clippy::cast_sign_loss)]
        Some((y * self.width + x) as usize)
    }

    /// The writable area: the grid bounds intersected with the clip stack.
    fn writable(&self) -> Option<Rect> {
        let bounds = Rect::new(0, 0, self.width, self.height);
        match self.clips.last() {
            Some(clip) => bounds.intersect(*clip),
            None => (!bounds.is_empty()).then_some(bounds),
        }
    }

    fn put_glyph(&mut self, x: i32, y: i32, ch: char, fg: Color, continuation: bool) {
        if let Some(i) = self.index(x, y) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            cell.fg = Some(fg);
            cell.continuation = continuation;
        }
    }
}

impl Surface for GridSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if color.a == 0 {
            return;
        }
        let Some(area) = self.writable().and_then(|w| w.intersect(rect)) else {
            return;
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(i) = self.index(x, y) {
                    self.cells[i].bg = Some(color);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Color) {
        let Some(area) = self.writable() else { return };
        let y = origin.y;
        if y < area.y || y >= area.bottom() {
            return;
        }

        let mut x = origin.x;
        for ch in text.chars() {
            let w = self.metrics.columns(ch);
            if w == 0 {
                continue;
            }
            // A glyph is drawn only if every cell it covers is writable.
            if x >= area.x && x + w <= area.right() {
                if ch == '\t' {
                    for dx in 0..w {
                        self.put_glyph(x + dx, y, ' ', color, false);
                    }
                } else {
                    self.put_glyph(x, y, ch, color, false);
                    for dx in 1..w {
                        self.put_glyph(x + dx, y, ' ', color, true);
                    }
                }
            }
            x += w;
            if x >= area.right() {
                break;
            }
        }
    }

    fn push_clip(&mut self, rect: Rect) {
        let clip = match self.clips.last() {
            Some(outer) => outer
                .intersect(rect)
                .unwrap_or(Rect::new(rect.x, rect.y, 0, 0)),
            None => rect,
        };
        self.clips.push(clip);
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
