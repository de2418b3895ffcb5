//! Scroll state: per-axis offsets, limits, hover and drag.
//!
//! Offsets are pixels into the content. `max` is recomputed from the
//! content and viewport extents every time the widget lays itself out;
//! after any update `0 <= offset <= max` holds.
//!
//! Dragging a thumb converts pointer travel into content travel by the
//! viewport/content ratio: a thumb that is a fifth of the track moves the
//! content five pixels per pixel of pointer movement.

/// Which scroll axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragAnchor {
    pointer: i32,
    offset: i32,
}

/// Scroll state along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollAxis {
    offset: i32,
    max: i32,
    hovered: bool,
    drag: Option<DragAnchor>,
}

impl ScrollAxis {
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> i32 {
        self.offset
    }

    #[inline]
    #[must_use]
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Recompute the limit from the extents and pull the offset inside it.
    pub fn update_extents(&mut self, content: i32, viewport: i32) {
        self.max = (content - viewport).max(0);
        self.offset = self.offset.clamp(0, self.max);
    }

    /// Scroll to `offset`, clamped. Returns whether the offset changed.
    pub fn scroll_to(&mut self, offset: i32) -> bool {
        let clamped = offset.clamp(0, self.max);
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    /// Scroll by `delta` pixels, clamped.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        self.scroll_to(self.offset.saturating_add(delta))
    }

    // -- Hover --------------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Returns whether the hover state changed.
    pub const fn set_hovered(&mut self, hovered: bool) -> bool {
        let changed = self.hovered != hovered;
        self.hovered = hovered;
        changed
    }

    // -- Drag ---------------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Remember the pointer position and current offset.
    pub const fn start_drag(&mut self, pointer: i32) {
        self.drag = Some(DragAnchor {
            pointer,
            offset: self.offset,
        });
    }

    /// Follow the pointer. Returns whether the offset changed.
    ///
    /// Does nothing when no drag is active or the content is empty.
    pub fn update_drag(&mut self, pointer: i32, viewport: i32, content: i32) -> bool {
        let Some(anchor) = self.drag else {
            return false;
        };
        if content <= 0 || viewport <= 0 {
            return false;
        }
        let ratio = f64::from(viewport) / f64::from(content);
        let delta = f64::from(pointer - anchor.pointer) / ratio;
        // Saturating float-to-int conversion.
        #[allow(clippy::cast_possible_truncation)]
        let target = (f64::from(anchor.offset) + delta).round() as i32;
        self.scroll_to(target)
    }

    pub const fn stop_drag(&mut self) {
        self.drag = None;
    }
}

/// Scroll state for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollModel {
    pub vertical: ScrollAxis,
    pub horizontal: ScrollAxis,
}

impl ScrollModel {
    #[must_use]
    pub const fn axis(&self, orientation: Orientation) -> &ScrollAxis {
        match orientation {
            Orientation::Vertical => &self.vertical,
            Orientation::Horizontal => &self.horizontal,
        }
    }

    pub const fn axis_mut(&mut self, orientation: Orientation) -> &mut ScrollAxis {
        match orientation {
            Orientation::Vertical => &mut self.vertical,
            Orientation::Horizontal => &mut self.horizontal,
        }
    }

    #[inline]
    #[must_use]
    pub const fn scroll_x(&self) -> i32 {
        self.horizontal.offset
    }

    #[inline]
    #[must_use]
    pub const fn scroll_y(&self) -> i32 {
        self.vertical.offset
    }

    /// The axis whose thumb is being dragged, if any.
    #[must_use]
    pub const fn dragging(&self) -> Option<Orientation> {
        if self.vertical.is_dragging() {
            Some(Orientation::Vertical)
        } else if self.horizontal.is_dragging() {
            Some(Orientation::Horizontal)
        } else {
            None
        }
    }

    pub const fn stop_dragging(&mut self) {
        self.vertical.stop_drag();
        self.horizontal.stop_drag();
    }

    /// Clear both hover flags. Returns whether either changed.
    pub const fn clear_hover(&mut self) -> bool {
        let v = self.vertical.set_hovered(false);
        let h = self.horizontal.set_hovered(false);
        v || h
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(content: i32, viewport: i32) -> ScrollAxis {
        let mut a = ScrollAxis::default();
        a.update_extents(content, viewport);
        a
    }

    #[test]
    fn max_is_content_minus_viewport() {
        assert_eq!(axis(500, 100).max(), 400);
        assert_eq!(axis(80, 100).max(), 0);
    }

    #[test]
    fn scroll_to_clamps() {
        let mut a = axis(500, 100);
        assert!(a.scroll_to(1000));
        assert_eq!(a.offset(), 400);
        assert!(a.scroll_to(-5));
        assert_eq!(a.offset(), 0);
        assert!(!a.scroll_to(0));
    }

    #[test]
    fn shrinking_content_clamps_offset() {
        let mut a = axis(500, 100);
        a.scroll_to(300);
        a.update_extents(250, 100);
        assert_eq!(a.offset(), 150);
    }

    #[test]
    fn scroll_by_accumulates() {
        let mut a = axis(500, 100);
        a.scroll_by(30);
        a.scroll_by(30);
        assert_eq!(a.offset(), 60);
        a.scroll_by(-100);
        assert_eq!(a.offset(), 0);
    }

    #[test]
    fn drag_scales_by_ratio() {
        let mut a = axis(500, 100);
        a.scroll_to(40);
        a.start_drag(10);
        assert!(a.update_drag(20, 100, 500));
        assert_eq!(a.offset(), 90);
        a.update_drag(5, 100, 500);
        assert_eq!(a.offset(), 15);
    }

    #[test]
    fn drag_clamps() {
        let mut a = axis(500, 100);
        a.start_drag(0);
        a.update_drag(1000, 100, 500);
        assert_eq!(a.offset(), 400);
        a.update_drag(-1000, 100, 500);
        assert_eq!(a.offset(), 0);
    }

    #[test]
    fn drag_without_start_is_noop() {
        let mut a = axis(500, 100);
        assert!(!a.update_drag(50, 100, 500));
        assert_eq!(a.offset(), 0);
    }

    #[test]
    fn stop_drag_ends_following() {
        let mut a = axis(500, 100);
        a.start_drag(0);
        a.stop_drag();
        assert!(!a.is_dragging());
        assert!(!a.update_drag(50, 100, 500));
    }

    #[test]
    fn hover_reports_changes() {
        let mut m = ScrollModel::default();
        assert!(m.vertical.set_hovered(true));
        assert!(!m.vertical.set_hovered(true));
        assert!(m.clear_hover());
        assert!(!m.clear_hover());
    }

    #[test]
    fn model_reports_dragging_axis() {
        let mut m = ScrollModel::default();
        assert_eq!(m.dragging(), None);
        m.axis_mut(Orientation::Horizontal).start_drag(3);
        assert_eq!(m.dragging(), Some(Orientation::Horizontal));
        m.stop_dragging();
        assert_eq!(m.dragging(), None);
    }
}
