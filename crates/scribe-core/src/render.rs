//! Text layout and painting.
//!
//! The renderer keeps no layout state between frames. Given the buffer,
//! caret, selection and scroll offsets it works out which lines and which
//! columns of those lines intersect the viewport and paints only those, so
//! the cost of a frame follows the visible glyph count rather than the
//! document size.
//!
//! # Coordinates
//!
//! Content coordinates put the top-left of the text (before padding) at the
//! origin: line `n` occupies `padding + n·line_height ..` vertically and a
//! column's x is `padding` plus the advance of the characters before it.
//! Screen position = viewport origin + content position − scroll.
//!
//! # Z-order
//!
//! Selection, then text, then caret.

use scribe_paint::geometry::{Point, Rect, Size};
use scribe_paint::metrics::FontMetrics;
use scribe_paint::surface::Surface;
use scribe_theme::Theme;

use crate::buffer::{LineInfo, TextBuffer};
use crate::caret::CaretModel;
use crate::highlight::{SyntaxHighlighter, TokenKind, tokens_tile};
use crate::selection::SelectionModel;

// ---------------------------------------------------------------------------
// Layout types
// ---------------------------------------------------------------------------

/// The window of lines a viewport can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleLines {
    pub first: usize,
    /// Upper bound; may run past the last line of the buffer.
    pub count: usize,
}

impl VisibleLines {
    #[must_use]
    pub const fn contains(&self, line: usize) -> bool {
        line >= self.first && line < self.first + self.count
    }
}

/// The visible columns `[start, end)` of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    pub start: usize,
    pub end: usize,
}

/// Per-character advances of one line.
struct LineGeometry<'a> {
    text: &'a str,
    /// `edges[k]` = advance of the first `k` chars. One longer than the line.
    edges: Vec<i32>,
    /// `bytes[k]` = byte offset of char `k`. One longer than the line.
    bytes: Vec<usize>,
}

impl<'a> LineGeometry<'a> {
    fn new(text: &'a str, metrics: &dyn FontMetrics) -> Self {
        let mut edges = Vec::with_capacity(text.len() + 1);
        let mut bytes = Vec::with_capacity(text.len() + 1);
        let mut x = 0;
        for (i, ch) in text.char_indices() {
            edges.push(x);
            bytes.push(i);
            x += metrics.char_width(ch);
        }
        edges.push(x);
        bytes.push(text.len());
        Self { text, edges, bytes }
    }

    fn chars(&self) -> usize {
        self.edges.len() - 1
    }

    fn substring(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.bytes[start]..self.bytes[end]]
    }

    /// Columns whose glyphs intersect `[left, right)` (relative to the
    /// line's first glyph).
    fn columns_within(&self, left: i32, right: i32) -> ColumnRange {
        let n = self.chars();
        let start = (0..n).find(|&c| self.edges[c + 1] > left).unwrap_or(n);
        let end = (start..n).find(|&c| self.edges[c] >= right).unwrap_or(n);
        ColumnRange { start, end }
    }
}

// ---------------------------------------------------------------------------
// TextFrame
// ---------------------------------------------------------------------------

/// Everything one frame of text painting reads.
#[derive(Clone, Copy)]
pub struct TextFrame<'a> {
    pub buffer: &'a TextBuffer,
    pub caret: &'a CaretModel,
    pub selection: &'a SelectionModel,
    pub theme: &'a Theme,
    pub metrics: &'a dyn FontMetrics,
    /// Where the text viewport sits on the surface.
    pub viewport: Rect,
    pub scroll_x: i32,
    pub scroll_y: i32,
    pub caret_visible: bool,
}

// ---------------------------------------------------------------------------
// TextRenderer
// ---------------------------------------------------------------------------

/// Lays out and paints buffer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRenderer {
    pub padding: i32,
    pub caret_width: i32,
}

impl TextRenderer {
    #[must_use]
    pub const fn new(padding: i32, caret_width: i32) -> Self {
        Self {
            padding,
            caret_width,
        }
    }

    // -- Layout -------------------------------------------------------------

    /// Lines intersecting a viewport `viewport_height` tall scrolled to
    /// `scroll_y`, with slack for partially visible lines at both edges.
    #[must_use]
    pub fn visible_lines(&self, scroll_y: i32, viewport_height: i32, line_height: i32) -> VisibleLines {
        if line_height <= 0 {
            return VisibleLines { first: 0, count: 0 };
        }
        VisibleLines {
            first: usize::try_from(scroll_y / line_height).unwrap_or(0),
            count: usize::try_from(viewport_height / line_height + 2).unwrap_or(0),
        }
    }

    /// Columns of `text` visible in a viewport `viewport_width` wide
    /// scrolled to `scroll_x`.
    #[must_use]
    pub fn visible_columns(
        &self,
        text: &str,
        metrics: &dyn FontMetrics,
        scroll_x: i32,
        viewport_width: i32,
    ) -> ColumnRange {
        let left = scroll_x - self.padding;
        LineGeometry::new(text, metrics).columns_within(left, left + viewport_width)
    }

    /// Total size of the laid-out text, padding and caret included.
    #[must_use]
    pub fn content_size(&self, buf: &TextBuffer, metrics: &dyn FontMetrics) -> Size {
        let widest = buf
            .lines()
            .map(|line| metrics.text_width(&line.text))
            .max()
            .unwrap_or(0);
        Size::new(
            widest + 2 * self.padding + self.caret_width,
            self.content_height(buf.line_count(), metrics.line_height()),
        )
    }

    #[must_use]
    pub fn content_height(&self, line_count: usize, line_height: i32) -> i32 {
        px(line_count).saturating_mul(line_height) + 2 * self.padding
    }

    /// Top of line `line` in content coordinates.
    #[must_use]
    pub fn line_top(&self, line: usize, line_height: i32) -> i32 {
        self.padding + px(line).saturating_mul(line_height)
    }

    /// Buffer offset nearest to a content-coordinate point.
    ///
    /// Above the text maps into the first line, below it to the end of the
    /// buffer. Within a line, a point past the middle of a glyph lands after
    /// it.
    #[must_use]
    pub fn offset_at(&self, buf: &TextBuffer, metrics: &dyn FontMetrics, point: Point) -> usize {
        let lh = metrics.line_height();
        if lh <= 0 {
            return 0;
        }
        let row = (point.y - self.padding).div_euclid(lh).max(0);
        let Some(line) = usize::try_from(row).ok().and_then(|r| buf.line(r)) else {
            return buf.len();
        };

        let x = point.x - self.padding;
        let mut advance = 0;
        for (i, ch) in line.text.chars().enumerate() {
            let w = metrics.char_width(ch);
            if x <= advance + w / 2 {
                return line.start + i;
            }
            advance += w;
        }
        line.end
    }

    /// The caret's rectangle for offset `pos`, in content coordinates.
    #[must_use]
    pub fn caret_rect(&self, buf: &TextBuffer, metrics: &dyn FontMetrics, pos: usize) -> Rect {
        let pos = pos.min(buf.len());
        let index = buf.line_index_of(pos);
        let line = buf.find_line_at(pos);
        let column = pos - line.start;
        let prefix: String = line.text.chars().take(column).collect();
        let x = self.padding + metrics.text_width(&prefix) - self.caret_width / 2;
        let lh = metrics.line_height();
        Rect::new(x, self.line_top(index, lh), self.caret_width, lh)
    }

    // -- Painting -----------------------------------------------------------

    /// Paint selection, text and caret into `frame.viewport`.
    ///
    /// With a highlighter, each line's visible substring is tokenized on its
    /// own. Output that doesn't reproduce the substring is discarded and the
    /// line drawn plain.
    pub fn paint(
        &self,
        surface: &mut dyn Surface,
        frame: &TextFrame<'_>,
        mut highlighter: Option<&mut dyn SyntaxHighlighter>,
    ) {
        let metrics = frame.metrics;
        let lh = metrics.line_height();
        let visible = self.visible_lines(frame.scroll_y, frame.viewport.height, lh);
        if visible.count == 0 {
            return;
        }

        let origin = Point::new(
            frame.viewport.x - frame.scroll_x,
            frame.viewport.y - frame.scroll_y,
        );
        let left = frame.scroll_x - self.padding;
        let right = left + frame.viewport.width;

        let lines: Vec<(usize, &LineInfo)> = frame
            .buffer
            .lines_from(visible.first, visible.count)
            .enumerate()
            .map(|(i, line)| (visible.first + i, line))
            .collect();
        let geometry: Vec<LineGeometry<'_>> = lines
            .iter()
            .map(|(_, line)| LineGeometry::new(&line.text, metrics))
            .collect();

        surface.push_clip(frame.viewport);

        // Selection.
        if let Some((sel_start, sel_end)) = frame.selection.bounds(frame.buffer) {
            let color = frame.theme.colors.selection;
            for ((index, line), geo) in lines.iter().zip(&geometry) {
                if !(sel_end > line.start && sel_start < line.end + 1) {
                    continue;
                }
                let y = origin.y + self.line_top(*index, lh);
                let s = sel_start.saturating_sub(line.start);
                let e = (sel_end - line.start).min(line.len());

                if line.is_empty() && s == 0 {
                    let x = origin.x + self.padding;
                    surface.fill_rect(Rect::new(x, y, metrics.char_width(' '), lh), color);
                    continue;
                }
                let cols = geo.columns_within(left, right);
                let (s, e) = (s.max(cols.start), e.min(cols.end));
                if e > s {
                    let x = origin.x + self.padding + geo.edges[s];
                    let w = geo.edges[e] - geo.edges[s];
                    surface.fill_rect(Rect::new(x, y, w, lh), color);
                }
            }
        }

        // Text.
        let foreground = frame.theme.colors.foreground;
        for ((index, _), geo) in lines.iter().zip(&geometry) {
            let cols = geo.columns_within(left, right);
            if cols.end <= cols.start {
                continue;
            }
            let text = geo.substring(cols.start, cols.end);
            let baseline = origin.y + self.line_top(*index, lh) + metrics.ascent();
            let mut x = origin.x + self.padding + geo.edges[cols.start];

            let tokens = highlighter.as_deref_mut().map(|h| h.highlight(text));
            match tokens {
                Some(tokens) if tokens_tile(text, &tokens) => {
                    for token in tokens.iter().filter(|t| !t.text.is_empty()) {
                        let color = frame.theme.token_color(token.kind);
                        surface.draw_text(&token.text, Point::new(x, baseline), color);
                        x += metrics.text_width(&token.text);
                    }
                }
                Some(_) => {
                    tracing::warn!(line = index, "highlighter tokens do not match the line; drawing plain");
                    surface.draw_text(text, Point::new(x, baseline), frame.theme.token_color(TokenKind::Plain));
                }
                None => surface.draw_text(text, Point::new(x, baseline), foreground),
            }
        }

        // Caret.
        if frame.caret_visible {
            let pos = frame.caret.position();
            let index = frame.buffer.line_index_of(pos);
            if index >= visible.first && index < visible.first + lines.len() {
                let rect = self.caret_rect(frame.buffer, metrics, pos);
                let rect = Rect::new(origin.x + rect.x, origin.y + rect.y, rect.width, rect.height);
                surface.fill_rect(rect, frame.theme.colors.caret);
            }
        }

        surface.pop_clip();
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(5, 2)
    }
}

/// A line count or index as a pixel multiplier.
pub(crate) fn px(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
