//! Undo/redo history: one record per primitive edit.
//!
//! Every mutation the widget performs (a typed character, backspace,
//! delete, enter, cut, paste, typing over a selection) is recorded as one
//! [`TextAction`] describing its net effect. A paste of any length is a
//! single `Insert`; replacing a selection is a `Delete` followed by an
//! `Insert`, so it takes two undos.
//!
//! # Usage
//!
//! ```text
//! let caret_before = caret.position();
//! history.add_edit(TextAction::Insert { position, text, caret_before });
//! buffer.insert_str(position, &text);
//! ```
//!
//! # Replay
//!
//! `undo` and `redo` hold `&mut UndoManager` for the whole replay, so no
//! caller can record an edit while one is being replayed. Replay calls the
//! buffer directly and never goes back through `add_edit`.

use crate::buffer::TextBuffer;
use crate::caret::CaretModel;

// ---------------------------------------------------------------------------
// TextAction
// ---------------------------------------------------------------------------

/// A single reversible edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextAction {
    /// `text` was inserted at `position`. Undo deletes it, redo inserts it.
    Insert {
        position: usize,
        text: String,
        caret_before: usize,
    },

    /// `text` was removed from `position`. Undo inserts it back, redo
    /// removes it again.
    Delete {
        position: usize,
        text: String,
        caret_before: usize,
    },
}

impl TextAction {
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Insert { position, .. } | Self::Delete { position, .. } => *position,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Insert { text, .. } | Self::Delete { text, .. } => text,
        }
    }

    /// Caret offset before the edit was made.
    #[must_use]
    pub const fn caret_before(&self) -> usize {
        match self {
            Self::Insert { caret_before, .. } | Self::Delete { caret_before, .. } => *caret_before,
        }
    }

    /// Apply the inverse. Returns where the caret goes.
    fn revert(&self, buf: &mut TextBuffer) -> usize {
        match self {
            Self::Insert { position, text, .. } => {
                buf.delete_range(*position, *position + text.chars().count());
            }
            Self::Delete { position, text, .. } => {
                buf.insert_str(*position, text);
            }
        }
        self.caret_before()
    }

    /// Apply the edit again. Returns where the caret goes.
    fn reapply(&self, buf: &mut TextBuffer) -> usize {
        match self {
            Self::Insert { position, text, .. } => {
                buf.insert_str(*position, text);
                *position + text.chars().count()
            }
            Self::Delete { position, text, .. } => {
                buf.delete_range(*position, *position + text.chars().count());
                *position
            }
        }
    }
}

// ---------------------------------------------------------------------------
// UndoManager
// ---------------------------------------------------------------------------

/// Undo and redo stacks.
///
/// New edits clear the redo stack: undoing and then typing discards the
/// undone branch.
#[derive(Debug, Default)]
pub struct UndoManager {
    undo_stack: Vec<TextAction>,
    redo_stack: Vec<TextAction>,
}

impl UndoManager {
    /// Create an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Record an edit. Clears the redo stack.
    pub fn add_edit(&mut self, action: TextAction) {
        self.redo_stack.clear();
        self.undo_stack.push(action);
    }

    /// Revert the most recent edit and put the caret where it was before
    /// it. Returns `false` if there was nothing to undo.
    ///
    /// # Panics
    ///
    /// Panics if the buffer was changed behind the history's back so the
    /// recorded offsets no longer fit.
    pub fn undo(&mut self, buf: &mut TextBuffer, caret: &mut CaretModel) -> bool {
        let Some(action) = self.undo_stack.pop() else {
            return false;
        };
        tracing::trace!(?action, "undo");
        let pos = action.revert(buf);
        caret.move_to(pos, buf);
        self.redo_stack.push(action);
        true
    }

    /// Re-apply the most recently undone edit and put the caret after it.
    /// Returns `false` if there was nothing to redo.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`undo`](Self::undo).
    pub fn redo(&mut self, buf: &mut TextBuffer, caret: &mut CaretModel) -> bool {
        let Some(action) = self.redo_stack.pop() else {
            return false;
        };
        tracing::trace!(?action, "redo");
        let pos = action.reapply(buf);
        caret.move_to(pos, buf);
        self.undo_stack.push(action);
        true
    }

    /// Forget everything (document load or reset).
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// The edit `undo` would revert next.
    #[must_use]
    pub fn last_undo(&self) -> Option<&TextAction> {
        self.undo_stack.last()
    }

    /// The undo stack, oldest first.
    #[must_use]
    pub fn undo_actions(&self) -> &[TextAction] {
        &self.undo_stack
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
