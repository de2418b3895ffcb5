//! Scroll bar geometry, hit testing and painting.
//!
//! Pure functions of `(viewport, content, scroll, max_scroll)`; the state
//! they read (offset, hover, drag) lives in [`ScrollAxis`](crate::scroll::ScrollAxis).
//!
//! ```text
//!   track (length = viewport extent)
//!   ┌──────────────────────────────────────────────┐
//!   │        ████████                              │
//!   └──────────────────────────────────────────────┘
//!    ◄ pos ► ◄thumb►
//!
//!   thumb = max(viewport² / content, min_thumb)
//!   pos   = scroll · (viewport − thumb) / max_scroll
//! ```
//!
//! A bar is invisible when the content fits the viewport.

use scribe_paint::color::Color;
use scribe_paint::geometry::{Point, Rect};
use scribe_paint::surface::Surface;
use scribe_theme::ThemeColors;

use crate::scroll::Orientation;

/// Padding between the track edge and the thumb, when the bar is thick
/// enough to afford it.
const THUMB_PADDING: i32 = 2;

/// Computed thumb geometry along the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollBarMetrics {
    pub visible: bool,
    pub thumb_size: i32,
    pub thumb_position: i32,
}

/// What a pointer press on a bar landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBarHit {
    Thumb,
    Track,
}

/// Thumb and track colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollBarStyle {
    pub thumb: Color,
    pub thumb_hover: Color,
    pub thumb_drag: Color,
    pub track: Color,
}

impl ScrollBarStyle {
    #[must_use]
    pub const fn from_theme(colors: &ThemeColors) -> Self {
        Self {
            thumb: colors.scroll_bar,
            thumb_hover: colors.scroll_bar_hover,
            thumb_drag: colors.scroll_bar_drag,
            track: colors.scroll_bar_background,
        }
    }
}

/// Scroll bar configuration shared by both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollBarModel {
    /// Cross-axis size of the bar.
    pub thickness: i32,
    /// Smallest thumb, along the track.
    pub min_thumb: i32,
    pub corner_radius: i32,
    pub style: ScrollBarStyle,
}

impl ScrollBarModel {
    /// Thumb size and position for the given extents.
    #[must_use]
    pub fn metrics(
        &self,
        viewport: i32,
        content: i32,
        scroll: i32,
        max_scroll: i32,
    ) -> ScrollBarMetrics {
        if viewport <= 0 || content <= viewport {
            return ScrollBarMetrics::default();
        }

        let proportional = round(f64::from(viewport) * f64::from(viewport) / f64::from(content));
        let thumb_size = proportional.max(self.min_thumb).min(viewport);

        let travel = viewport - thumb_size;
        let thumb_position = if travel <= 0 || max_scroll <= 0 {
            0
        } else {
            let scroll = scroll.clamp(0, max_scroll);
            round(f64::from(scroll) * f64::from(travel) / f64::from(max_scroll))
        };

        ScrollBarMetrics {
            visible: true,
            thumb_size,
            thumb_position,
        }
    }

    /// Scroll offset for a press at `click` (relative to the track start)
    /// that missed the thumb: center the thumb on the pointer.
    #[must_use]
    pub fn scroll_from_click(
        &self,
        click: i32,
        metrics: &ScrollBarMetrics,
        viewport: i32,
        max_scroll: i32,
    ) -> i32 {
        let travel = viewport - metrics.thumb_size;
        if travel <= 0 || max_scroll <= 0 {
            return 0;
        }
        let fraction = f64::from(click - metrics.thumb_size / 2) / f64::from(travel);
        round(fraction * f64::from(max_scroll)).clamp(0, max_scroll)
    }

    /// The thumb's rectangle inside `track`.
    #[must_use]
    pub const fn thumb_rect(
        &self,
        orientation: Orientation,
        track: Rect,
        metrics: &ScrollBarMetrics,
    ) -> Rect {
        match orientation {
            Orientation::Vertical => Rect::new(
                track.x,
                track.y + metrics.thumb_position,
                track.width,
                metrics.thumb_size,
            ),
            Orientation::Horizontal => Rect::new(
                track.x + metrics.thumb_position,
                track.y,
                metrics.thumb_size,
                track.height,
            ),
        }
    }

    /// What `point` hits, or `None` if it misses the (visible) bar.
    #[must_use]
    pub fn hit_test(
        &self,
        orientation: Orientation,
        track: Rect,
        metrics: &ScrollBarMetrics,
        point: Point,
    ) -> Option<ScrollBarHit> {
        if !metrics.visible || !track.contains(point) {
            return None;
        }
        if self.thumb_rect(orientation, track, metrics).contains(point) {
            Some(ScrollBarHit::Thumb)
        } else {
            Some(ScrollBarHit::Track)
        }
    }

    /// Paint the track, then the thumb in its drag, hover or normal color.
    pub fn paint(
        &self,
        surface: &mut dyn Surface,
        orientation: Orientation,
        track: Rect,
        metrics: &ScrollBarMetrics,
        hovered: bool,
        dragging: bool,
    ) {
        if !metrics.visible || track.is_empty() {
            return;
        }
        surface.fill_round_rect(track, self.corner_radius, self.style.track);

        let color = if dragging {
            self.style.thumb_drag
        } else if hovered {
            self.style.thumb_hover
        } else {
            self.style.thumb
        };
        let padding = THUMB_PADDING.min((self.thickness - 1) / 2).max(0);
        let thumb = self.thumb_rect(orientation, track, metrics).inset(padding);
        if !thumb.is_empty() {
            surface.fill_round_rect(thumb, self.corner_radius, color);
        }
    }
}

// Values are pixel extents; they fit in i32 by construction.
#[allow(clippy::cast_possible_truncation)]
fn round(v: f64) -> i32 {
    v.round() as i32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scribe_paint::surface::DisplayList;

    const THUMB: Color = Color::rgb(1, 1, 1);
    const HOVER: Color = Color::rgb(2, 2, 2);
    const DRAG: Color = Color::rgb(3, 3, 3);
    const TRACK: Color = Color::rgb(4, 4, 4);

    fn model(min_thumb: i32) -> ScrollBarModel {
        ScrollBarModel {
            thickness: 15,
            min_thumb,
            corner_radius: 4,
            style: ScrollBarStyle {
                thumb: THUMB,
                thumb_hover: HOVER,
                thumb_drag: DRAG,
                track: TRACK,
            },
        }
    }

    // -- metrics ------------------------------------------------------------

    #[test]
    fn thumb_size_and_position() {
        let m = model(15);
        let at_top = m.metrics(100, 500, 0, 400);
        assert_eq!(
            at_top,
            ScrollBarMetrics {
                visible: true,
                thumb_size: 20,
                thumb_position: 0,
            }
        );
        assert_eq!(m.metrics(100, 500, 200, 400).thumb_position, 40);
        assert_eq!(m.metrics(100, 500, 400, 400).thumb_position, 80);
    }

    #[test]
    fn thumb_never_below_minimum() {
        let m = model(30);
        assert_eq!(m.metrics(100, 10_000, 0, 9_900).thumb_size, 30);
    }

    #[test]
    fn thumb_never_exceeds_track() {
        let m = model(50);
        let metrics = m.metrics(40, 41, 1, 1);
        assert_eq!(metrics.thumb_size, 40);
        assert_eq!(metrics.thumb_position, 0);
    }

    #[test]
    fn invisible_when_content_fits() {
        let m = model(15);
        assert!(!m.metrics(100, 100, 0, 0).visible);
        assert!(!m.metrics(100, 40, 0, 0).visible);
        assert!(!m.metrics(0, 40, 0, 0).visible);
    }

    #[test]
    fn zero_max_scroll_is_guarded() {
        let m = model(15);
        assert_eq!(m.metrics(100, 500, 50, 0).thumb_position, 0);
    }

    // -- click --------------------------------------------------------------

    #[test]
    fn click_centers_thumb() {
        let m = model(15);
        let metrics = m.metrics(100, 500, 0, 400);
        // Thumb center at 50 → fraction (50 - 10) / 80 = 0.5.
        assert_eq!(m.scroll_from_click(50, &metrics, 100, 400), 200);
    }

    #[test]
    fn click_clamps_at_ends() {
        let m = model(15);
        let metrics = m.metrics(100, 500, 0, 400);
        assert_eq!(m.scroll_from_click(0, &metrics, 100, 400), 0);
        assert_eq!(m.scroll_from_click(99, &metrics, 100, 400), 400);
    }

    // -- hit testing --------------------------------------------------------

    #[test]
    fn hit_thumb_and_track() {
        let m = model(15);
        let track = Rect::new(85, 0, 15, 100);
        let metrics = m.metrics(100, 500, 200, 400);
        let v = Orientation::Vertical;
        assert_eq!(m.hit_test(v, track, &metrics, Point::new(90, 45)), Some(ScrollBarHit::Thumb));
        assert_eq!(m.hit_test(v, track, &metrics, Point::new(90, 5)), Some(ScrollBarHit::Track));
        assert_eq!(m.hit_test(v, track, &metrics, Point::new(10, 45)), None);
    }

    #[test]
    fn horizontal_thumb_rect() {
        let m = model(15);
        let track = Rect::new(0, 85, 100, 15);
        let metrics = m.metrics(100, 500, 200, 400);
        assert_eq!(
            m.thumb_rect(Orientation::Horizontal, track, &metrics),
            Rect::new(40, 85, 20, 15)
        );
    }

    #[test]
    fn invisible_bar_is_never_hit() {
        let m = model(15);
        let track = Rect::new(0, 0, 15, 100);
        let metrics = m.metrics(100, 50, 0, 0);
        assert_eq!(m.hit_test(Orientation::Vertical, track, &metrics, Point::new(1, 1)), None);
    }

    // -- painting -----------------------------------------------------------

    #[test]
    fn paint_track_then_thumb() {
        let m = model(15);
        let track = Rect::new(85, 0, 15, 100);
        let metrics = m.metrics(100, 500, 0, 400);
        let mut dl = DisplayList::new();
        m.paint(&mut dl, Orientation::Vertical, track, &metrics, false, false);
        assert_eq!(
            dl.fills().collect::<Vec<_>>(),
            vec![(track, TRACK), (Rect::new(87, 2, 11, 16), THUMB)]
        );
    }

    #[test]
    fn paint_color_priority() {
        let m = model(15);
        let track = Rect::new(0, 0, 15, 100);
        let metrics = m.metrics(100, 500, 0, 400);
        for (hovered, dragging, expected) in
            [(true, false, HOVER), (false, true, DRAG), (true, true, DRAG)]
        {
            let mut dl = DisplayList::new();
            m.paint(&mut dl, Orientation::Vertical, track, &metrics, hovered, dragging);
            assert_eq!(dl.fills().last().map(|(_, c)| c), Some(expected));
        }
    }

    #[test]
    fn paint_invisible_draws_nothing() {
        let m = model(15);
        let mut dl = DisplayList::new();
        let metrics = m.metrics(100, 10, 0, 0);
        m.paint(&mut dl, Orientation::Vertical, Rect::new(0, 0, 15, 100), &metrics, false, false);
        assert!(dl.ops().is_empty());
    }

    #[test]
    fn thin_bar_skips_padding() {
        let mut m = model(1);
        m.thickness = 1;
        let track = Rect::new(9, 0, 1, 10);
        let metrics = m.metrics(10, 20, 0, 10);
        let mut dl = DisplayList::new();
        m.paint(&mut dl, Orientation::Vertical, track, &metrics, false, false);
        assert_eq!(dl.fills().nth(1), Some((Rect::new(9, 0, 1, 5), THUMB)));
    }
}
