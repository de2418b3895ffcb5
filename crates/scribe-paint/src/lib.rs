// SPDX-License-Identifier: MIT
//
// scribe-paint — the drawing vocabulary shared by the editor core.
//
// Nothing in here knows about text buffers. The editor describes each frame
// as a sequence of rectangle fills and text runs against a `Surface`, and
// measures text through a `FontMetrics` implementation. Two surfaces ship
// with the crate:
//
//   DisplayList , records every call, for assertions in tests
//   GridSurface , one pixel per character cell, for headless output
//
// A windowing backend implements `Surface` and `FontMetrics` on top of its
// own canvas and font APIs.

pub mod color;
pub mod geometry;
pub mod grid;
pub mod metrics;
pub mod surface;

pub use color::Color;
pub use geometry::{Point, Rect, Size};
pub use grid::GridSurface;
pub use metrics::{FontMetrics, MonospaceMetrics};
pub use surface::{DisplayList, DrawOp, Surface};
