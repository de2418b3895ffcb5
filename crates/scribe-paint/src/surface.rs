// SPDX-License-Identifier: MIT
//
// The paint target abstraction.
//
// A `Surface` accepts the handful of primitives the editor draws with:
// solid rectangles, rounded rectangles (scroll bar thumbs), and text runs
// positioned by their baseline. Clipping is a stack; every primitive is
// clipped to the intersection of all pushed rectangles.
//
// `DisplayList` is the recording implementation. It keeps the clip that was
// active for each primitive so tests can assert both what was drawn and
// where it was allowed to land.

use crate::color::Color;
use crate::geometry::{Point, Rect};

// ─── Surface ─────────────────────────────────────────────────────────────────

/// Something the editor can paint into.
pub trait Surface {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a rectangle with rounded corners.
    ///
    /// Surfaces that can't round corners fall back to a plain fill.
    fn fill_round_rect(&mut self, rect: Rect, radius: i32, color: Color) {
        let _ = radius;
        self.fill_rect(rect, color);
    }

    /// Draw a run of text whose baseline starts at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, color: Color);

    /// Restrict subsequent drawing to `rect` (intersected with the current
    /// clip).
    fn push_clip(&mut self, rect: Rect);

    /// Undo the most recent [`push_clip`](Self::push_clip).
    fn pop_clip(&mut self);
}

// ─── DisplayList ─────────────────────────────────────────────────────────────

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Color,
        clip: Option<Rect>,
    },
    FillRoundRect {
        rect: Rect,
        radius: i32,
        color: Color,
        clip: Option<Rect>,
    },
    Text {
        text: String,
        origin: Point,
        color: Color,
        clip: Option<Rect>,
    },
}

/// A surface that records what it is asked to draw.
#[derive(Debug, Default)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
    clips: Vec<Rect>,
}

impl DisplayList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every primitive in draw order.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// The text runs in draw order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, Color)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text {
                text,
                origin,
                color,
                ..
            } => Some((text.as_str(), *origin, *color)),
            _ => None,
        })
    }

    /// The solid rectangle fills (plain and rounded) in draw order.
    pub fn fills(&self) -> impl Iterator<Item = (Rect, Color)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillRect { rect, color, .. } | DrawOp::FillRoundRect { rect, color, .. } => {
                Some((*rect, *color))
            }
            DrawOp::Text { .. } => None,
        })
    }

    /// Fills painted in exactly `color`.
    pub fn fills_with(&self, color: Color) -> impl Iterator<Item = Rect> + '_ {
        self.fills().filter(move |(_, c)| *c == color).map(|(r, _)| r)
    }

    /// Current clip depth. Zero once every push has been popped.
    #[must_use]
    pub fn clip_depth(&self) -> usize {
        self.clips.len()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.clips.clear();
    }

    fn current_clip(&self) -> Option<Rect> {
        self.clips.last().copied()
    }
}

impl Surface for DisplayList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let clip = self.current_clip();
        self.ops.push(DrawOp::FillRect { rect, color, clip });
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: i32, color: Color) {
        let clip = self.current_clip();
        self.ops.push(DrawOp::FillRoundRect {
            rect,
            radius,
            color,
            clip,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Color) {
        let clip = self.current_clip();
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin,
            color,
            clip,
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        // A disjoint clip is recorded as a zero-area rect so nothing leaks.
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn records_in_order() {
        let mut dl = DisplayList::new();
        dl.fill_rect(Rect::new(0, 0, 4, 4), Color::BLACK);
        dl.draw_text("hi", Point::new(1, 2), Color::WHITE);
        dl.fill_round_rect(Rect::new(1, 1, 2, 2), 3, Color::WHITE);

        assert_eq!(dl.ops().len(), 3);
        assert_eq!(
            dl.texts().collect::<Vec<_>>(),
            vec![("hi", Point::new(1, 2), Color::WHITE)]
        );
        assert_eq!(
            dl.fills().collect::<Vec<_>>(),
            vec![
                (Rect::new(0, 0, 4, 4), Color::BLACK),
                (Rect::new(1, 1, 2, 2), Color::WHITE),
            ]
        );
    }

    #[test]
    fn nested_clips_intersect() {
        let mut dl = DisplayList::new();
        dl.push_clip(Rect::new(0, 0, 10, 10));
        dl.push_clip(Rect::new(5, 5, 10, 10));
        dl.fill_rect(Rect::new(0, 0, 20, 20), Color::BLACK);
        dl.pop_clip();
        dl.fill_rect(Rect::new(0, 0, 20, 20), Color::WHITE);
        dl.pop_clip();
        dl.fill_rect(Rect::new(0, 0, 20, 20), Color::BLACK);

        let clips: Vec<_> = dl
            .ops()
            .iter()
            .map(|op| match op {
                DrawOp::FillRect { clip, .. } => *clip,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(
            clips,
            vec![
                Some(Rect::new(5, 5, 5, 5)),
                Some(Rect::new(0, 0, 10, 10)),
                None,
            ]
        );
        assert_eq!(dl.clip_depth(), 0);
    }

    #[test]
    fn disjoint_clip_is_empty() {
        let mut dl = DisplayList::new();
        dl.push_clip(Rect::new(0, 0, 5, 5));
        dl.push_clip(Rect::new(10, 10, 5, 5));
        dl.fill_rect(Rect::new(0, 0, 1, 1), Color::BLACK);
        match &dl.ops()[0] {
            DrawOp::FillRect { clip: Some(c), .. } => assert!(c.is_empty()),
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn fills_with_filters_by_color() {
        let mut dl = DisplayList::new();
        dl.fill_rect(Rect::new(0, 0, 1, 1), Color::BLACK);
        dl.fill_rect(Rect::new(1, 0, 1, 1), Color::WHITE);
        dl.fill_rect(Rect::new(2, 0, 1, 1), Color::BLACK);
        assert_eq!(dl.fills_with(Color::BLACK).count(), 2);
    }
}
