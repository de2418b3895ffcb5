//! Selection: an anchor/extent pair over buffer offsets.
//!
//! The anchor is where the selection started (mouse press, first
//! Shift+arrow); the extent follows the caret. Either may be the larger
//! offset. [`SelectionModel::current`] always reports normalized bounds.
//!
//! A selection with `anchor == extent` exists (a click that hasn't dragged
//! yet) but has no text. Deleting it only clears it.

use crate::buffer::TextBuffer;
use crate::caret::CaretModel;
use crate::history::{TextAction, UndoManager};
use crate::word;

/// Normalized selection: `start <= end`, `text == buffer[start..end]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionBounds {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    anchor: usize,
    extent: usize,
}

/// The current selection, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionModel {
    span: Option<Span>,
}

impl SelectionModel {
    #[must_use]
    pub const fn new() -> Self {
        Self { span: None }
    }

    // -- State --------------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn has_selection(&self) -> bool {
        self.span.is_some()
    }

    #[must_use]
    pub fn anchor(&self) -> Option<usize> {
        self.span.map(|s| s.anchor)
    }

    #[must_use]
    pub fn extent(&self) -> Option<usize> {
        self.span.map(|s| s.extent)
    }

    /// Normalized `(start, end)`, clamped to the buffer.
    #[must_use]
    pub fn bounds(&self, buf: &TextBuffer) -> Option<(usize, usize)> {
        let span = self.span?;
        let len = buf.len();
        let a = span.anchor.min(len);
        let e = span.extent.min(len);
        Some((a.min(e), a.max(e)))
    }

    /// Normalized bounds with the selected text.
    #[must_use]
    pub fn current(&self, buf: &TextBuffer) -> Option<SelectionBounds> {
        let (start, end) = self.bounds(buf)?;
        Some(SelectionBounds {
            start,
            end,
            text: buf.slice(start, end),
        })
    }

    /// The selected text, or `None` if nothing (or nothing visible) is
    /// selected.
    #[must_use]
    pub fn selected_text(&self, buf: &TextBuffer) -> Option<String> {
        self.current(buf)
            .filter(|s| s.start < s.end)
            .map(|s| s.text)
    }

    // -- Mutation -----------------------------------------------------------

    /// Anchor a new, empty selection at `pos`.
    pub fn start_selection(&mut self, pos: usize, buf: &TextBuffer) {
        let pos = pos.min(buf.len());
        self.span = Some(Span {
            anchor: pos,
            extent: pos,
        });
    }

    /// Move the extent to `pos`, anchoring first if nothing is selected.
    pub fn update_selection(&mut self, pos: usize, buf: &TextBuffer) {
        let pos = pos.min(buf.len());
        match &mut self.span {
            Some(span) => span.extent = pos,
            None => self.start_selection(pos, buf),
        }
    }

    pub const fn clear(&mut self) {
        self.span = None;
    }

    /// Select the word around `pos` and return its bounds.
    pub fn select_word(&mut self, pos: usize, buf: &TextBuffer) -> (usize, usize) {
        let (start, end) = word::word_bounds_at(buf, pos);
        self.span = Some(Span {
            anchor: start,
            extent: end,
        });
        (start, end)
    }

    /// Select exactly `[start, end)`.
    pub fn select_line(&mut self, start: usize, end: usize, buf: &TextBuffer) {
        self.start_selection(start, buf);
        self.update_selection(end, buf);
    }

    pub fn select_all(&mut self, buf: &TextBuffer) {
        self.select_line(0, buf.len(), buf);
    }

    /// Delete the selected text.
    ///
    /// Records one `Delete` (when `history` is given) carrying the caret
    /// offset from before the edit, removes the range, moves the caret to
    /// its start and clears the selection. Returns `false` without touching
    /// the buffer if nothing is selected.
    pub fn delete_selected_text(
        &mut self,
        buf: &mut TextBuffer,
        caret: &mut CaretModel,
        history: Option<&mut UndoManager>,
    ) -> bool {
        let Some((start, end)) = self.bounds(buf) else {
            return false;
        };
        self.clear();
        if start == end {
            return false;
        }

        let text = buf.delete_range(start, end);
        if let Some(history) = history {
            history.add_edit(TextAction::Delete {
                position: start,
                text,
                caret_before: caret.position(),
            });
        }
        caret.move_to(start, buf);
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
