// SPDX-License-Identifier: MIT
//
// Integer pixel geometry.
//
// Coordinates are signed: content scrolled past the top-left of a viewport
// lands at negative positions and is discarded by clipping, not by callers.

// ─── Point / Size ────────────────────────────────────────────────────────────

/// A pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

// ─── Rect ────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle: `[x, x + width) × [y, y + height)`.
///
/// Negative widths or heights are treated as empty.
///
/// ```
/// use scribe_paint::geometry::Rect;
///
/// let viewport = Rect::new(0, 0, 80, 24);
/// let gutter = Rect::new(-3, 0, 6, 24);
/// assert_eq!(viewport.intersect(gutter), Some(Rect::new(0, 0, 3, 24)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// A rectangle anchored at the origin.
    #[inline]
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    #[inline]
    #[must_use]
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// The overlapping area, or `None` if the rectangles don't overlap.
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Self::new(x1, y1, x2 - x1, y2 - y1))
    }

    /// Shrink by `amount` on every side. Never produces negative sizes.
    #[must_use]
    pub fn inset(self, amount: i32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2 * amount).max(0),
            (self.height - 2 * amount).max(0),
        )
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
