//! Line-number gutter.
//!
//! A column to the left of the text, wide enough for the largest line
//! number plus padding on both sides. Numbers are right-aligned and scroll
//! vertically with the text.

use scribe_paint::color::Color;
use scribe_paint::geometry::{Point, Rect};
use scribe_paint::metrics::FontMetrics;
use scribe_paint::surface::Surface;

use crate::render::{VisibleLines, px};

/// Paints line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineNumbersRenderer {
    pub visible: bool,
    /// Horizontal space around the numbers.
    pub padding: i32,
    pub text_color: Color,
    pub background: Color,
}

impl LineNumbersRenderer {
    /// Gutter width for a document of `line_count` lines, or 0 when hidden.
    #[must_use]
    pub fn width(&self, line_count: usize, metrics: &dyn FontMetrics) -> i32 {
        if !self.visible {
            return 0;
        }
        metrics.text_width(&line_count.max(1).to_string()) + 2 * self.padding
    }

    /// Paint the gutter into `rect`.
    ///
    /// `text_padding` is the text area's top padding, so numbers share a
    /// baseline with their lines.
    #[allow(clippy::too_many_arguments)]
    pub fn paint(
        &self,
        surface: &mut dyn Surface,
        rect: Rect,
        line_count: usize,
        lines: VisibleLines,
        scroll_y: i32,
        text_padding: i32,
        metrics: &dyn FontMetrics,
    ) {
        if !self.visible || rect.is_empty() {
            return;
        }
        surface.push_clip(rect);
        surface.fill_rect(rect, self.background);

        let lh = metrics.line_height();
        let last = (lines.first + lines.count).min(line_count);
        for index in lines.first..last {
            let number = (index + 1).to_string();
            let x = rect.right() - self.padding - metrics.text_width(&number);
            let y = rect.y - scroll_y + text_padding + px(index).saturating_mul(lh) + metrics.ascent();
            surface.draw_text(&number, Point::new(x, y), self.text_color);
        }
        surface.pop_clip();
    }
}
