//! Text buffer: character storage plus a line index.
//!
//! A `TextBuffer` wraps a [`ropey::Rope`] for O(log n) edits anywhere in the
//! document and keeps a derived line index alongside it: an ordered map from
//! each line's start offset to a [`LineInfo`] carrying the line's span and
//! cached text.
//!
//! # Offsets
//!
//! Every position is a **char offset** (Unicode scalar value index) into the
//! whole document, in `[0, len]`. Lines are separated by `'\n'` only; a
//! line's `end` is the offset of its newline (or the document end) and never
//! includes it. An empty buffer has exactly one line, `{0, 0, ""}`.
//!
//! ```text
//!   "ab\ncd\n"      offsets: a=0 b=1 \n=2 c=3 d=4 \n=5 (len 6)
//!
//!   start → LineInfo
//!     0   → {start: 0, end: 2, text: "ab"}
//!     3   → {start: 3, end: 5, text: "cd"}
//!     6   → {start: 6, end: 6, text: ""}
//! ```
//!
//! # Keeping the index current
//!
//! Every mutation starts at some offset `pos`; nothing before `pos` changes.
//! The entry for the line containing `pos` therefore still starts a line
//! afterwards, so the index drops that entry and everything after it and
//! rescans forward from its start. A full rescan only happens on load and
//! clear. Both paths produce identical maps; the property tests at the
//! bottom check that on random edit sequences.
//!
//! # Preconditions
//!
//! Mutations with out-of-range offsets panic. Clamping here would silently
//! shift the offsets recorded in the undo log.

use std::collections::BTreeMap;
use std::fs;
use std::ops::Bound;
use std::path::Path;

use ropey::Rope;

use crate::error::{Error, Result};

/// The line separator. Offsets never point inside a multi-char separator.
pub const NEWLINE: char = '\n';

// ---------------------------------------------------------------------------
// LineInfo
// ---------------------------------------------------------------------------

/// One line of the document: `[start, end)` plus its text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LineInfo {
    /// Offset of the first character.
    pub start: usize,
    /// Offset just past the last character, excluding the newline.
    pub end: usize,
    /// `buffer[start..end]`.
    pub text: String,
}

impl LineInfo {
    /// Number of chars on the line.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `pos` lies in `[start, end]` (the end is inclusive: a caret
    /// sitting before the newline belongs to this line).
    #[inline]
    #[must_use]
    pub const fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos <= self.end
    }
}

// ---------------------------------------------------------------------------
// TextBuffer
// ---------------------------------------------------------------------------

/// The document: a rope plus an incrementally maintained line index.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
    lines: BTreeMap<usize, LineInfo>,
    modified: bool,
}

impl TextBuffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Create a buffer holding `text`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut buf = Self {
            rope: Rope::from_str(text),
            lines: BTreeMap::new(),
            modified: false,
        };
        buf.full_rescan();
        buf
    }

    /// Read a UTF-8 file into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file can't be read or isn't UTF-8.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let buf = Self::from_text(&text);
        tracing::debug!(path = %path.display(), chars = buf.len(), "loaded document");
        Ok(buf)
    }

    // -- Queries ------------------------------------------------------------

    /// Document length in chars.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The whole document.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// The char at `pos`, or `None` at or past the end.
    #[must_use]
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.rope.get_char(pos)
    }

    /// The text in `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > len`.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> String {
        assert!(
            start <= end && end <= self.len(),
            "slice {start}..{end} out of bounds (len {})",
            self.len()
        );
        self.rope.slice(start..end).to_string()
    }

    /// Number of lines. Always at least 1.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The line containing `pos`, after clamping `pos` into `[0, len]`.
    ///
    /// A position equal to a line's `end` belongs to that line, never to
    /// the following one.
    #[must_use]
    pub fn find_line_at(&self, pos: usize) -> &LineInfo {
        let pos = pos.min(self.len());
        self.lines
            .range(..=pos)
            .next_back()
            .map(|(_, line)| line)
            .expect("line index always has a line starting at 0")
    }

    /// The line before `line`, or `None` if `line` is the first.
    #[must_use]
    pub fn find_previous_line(&self, line: &LineInfo) -> Option<&LineInfo> {
        self.lines.range(..line.start).next_back().map(|(_, l)| l)
    }

    /// The line after `line`, or `None` if `line` is the last.
    #[must_use]
    pub fn find_next_line(&self, line: &LineInfo) -> Option<&LineInfo> {
        self.lines
            .range((Bound::Excluded(line.start), Bound::Unbounded))
            .next()
            .map(|(_, l)| l)
    }

    /// 0-based line number of the line containing `pos` (clamped).
    #[must_use]
    pub fn line_index_of(&self, pos: usize) -> usize {
        self.rope.char_to_line(pos.min(self.len()))
    }

    /// The line with 0-based number `index`.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&LineInfo> {
        if index >= self.line_count() {
            return None;
        }
        self.lines.get(&self.rope.line_to_char(index))
    }

    /// Up to `count` lines starting at line number `first`.
    ///
    /// Cost is proportional to `count`, not to the document size.
    pub fn lines_from(&self, first: usize, count: usize) -> impl Iterator<Item = &LineInfo> {
        let start = if first < self.line_count() {
            self.rope.line_to_char(first)
        } else {
            usize::MAX
        };
        self.lines.range(start..).take(count).map(|(_, l)| l)
    }

    /// Every line in document order.
    pub fn lines(&self) -> impl Iterator<Item = &LineInfo> {
        self.lines.values()
    }

    /// Snapshot of every line entry.
    #[must_use]
    pub fn all_lines(&self) -> Vec<LineInfo> {
        self.lines.values().cloned().collect()
    }

    /// The text of every line.
    #[must_use]
    pub fn get_lines(&self) -> Vec<String> {
        self.lines.values().map(|l| l.text.clone()).collect()
    }

    // -- Mutation -----------------------------------------------------------

    /// Insert `ch` before `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len`.
    pub fn insert_char(&mut self, pos: usize, ch: char) {
        self.check_insert(pos);
        self.rope.insert_char(pos, ch);
        self.after_edit(pos);
    }

    /// Insert `text` before `pos` with a single index update.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len`.
    pub fn insert_str(&mut self, pos: usize, text: &str) {
        self.check_insert(pos);
        if text.is_empty() {
            return;
        }
        self.rope.insert(pos, text);
        self.after_edit(pos);
    }

    /// Remove and return the char at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len`.
    pub fn delete_char_at(&mut self, pos: usize) -> char {
        let len = self.len();
        assert!(pos < len, "delete position {pos} out of bounds (len {len})");
        let ch = self.rope.char(pos);
        self.rope.remove(pos..=pos);
        self.after_edit(pos);
        ch
    }

    /// Remove `[start, end)` as one edit and return the removed text.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > len`.
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        let len = self.len();
        assert!(
            start <= end && end <= len,
            "delete range {start}..{end} out of bounds (len {len})"
        );
        if start == end {
            return String::new();
        }
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        self.after_edit(start);
        removed
    }

    /// Remove everything. Returns `false` if the buffer was already empty.
    pub fn clear(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.rope = Rope::new();
        self.full_rescan();
        self.modified = true;
        true
    }

    /// Replace the whole document. The result counts as unmodified.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.full_rescan();
        self.modified = false;
    }

    // -- Metadata -----------------------------------------------------------

    /// True if the buffer changed since it was created, loaded or saved.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    #[inline]
    pub const fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Write the document to `path` verbatim and mark it saved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if the write fails.
    pub fn save_to_file(&mut self, path: &Path) -> Result<()> {
        fs::write(path, self.text()).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.modified = false;
        tracing::debug!(path = %path.display(), chars = self.len(), "saved document");
        Ok(())
    }

    // -- Line index ---------------------------------------------------------

    fn check_insert(&self, pos: usize) {
        let len = self.len();
        assert!(pos <= len, "insert position {pos} out of bounds (len {len})");
    }

    fn after_edit(&mut self, pos: usize) {
        self.modified = true;
        self.rescan_from(pos);
    }

    /// Rebuild the index from the line containing `pos` to the end.
    fn rescan_from(&mut self, pos: usize) {
        let anchor = self
            .lines
            .range(..=pos)
            .next_back()
            .map_or(0, |(&start, _)| start);
        // Drops `anchor` and every later entry.
        self.lines.split_off(&anchor);
        self.scan_from(anchor);
    }

    fn full_rescan(&mut self) {
        self.lines.clear();
        self.scan_from(0);
    }

    /// Append entries for every line starting at `start`, which must be a
    /// line start.
    fn scan_from(&mut self, start: usize) {
        let mut line_start = start;
        let mut text = String::new();
        for (offset, ch) in (start..).zip(self.rope.chars_at(start)) {
            if ch == NEWLINE {
                let line = LineInfo {
                    start: line_start,
                    end: offset,
                    text: std::mem::take(&mut text),
                };
                self.lines.insert(line_start, line);
                line_start = offset + 1;
            } else {
                text.push(ch);
            }
        }
        let end = self.len();
        self.lines.insert(
            line_start,
            LineInfo {
                start: line_start,
                end,
                text,
            },
        );
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
