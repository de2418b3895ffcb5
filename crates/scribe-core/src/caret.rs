//! Caret: the single insertion point.
//!
//! The `CaretModel` is just an offset in `[0, len]`. It does not own or
//! reference the buffer; every method that needs line structure takes the
//! buffer as a parameter, the same way the renderer and selection do.
//!
//! Navigation never fails. At a document boundary a move is a no-op.
//!
//! Vertical moves keep the caret's column (distance from line start),
//! clipped to the target line's length. There is no sticky column: moving
//! through a short line forgets the original column.

use crate::buffer::TextBuffer;
use crate::word;

/// The caret's offset together with the line it sits on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaretPosition {
    pub offset: usize,
    pub line_start: usize,
    pub line_end: usize,
    pub line_text: String,
}

impl CaretPosition {
    /// Distance from the start of the line.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.offset - self.line_start
    }
}

/// A caret in a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaretModel {
    position: usize,
}

impl CaretModel {
    /// A caret at offset 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { position: 0 }
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Jump to `pos`, clamped to the buffer.
    pub fn move_to(&mut self, pos: usize, buf: &TextBuffer) {
        self.position = pos.min(buf.len());
    }

    /// Pull the caret back inside the buffer after an external edit.
    pub fn clamp(&mut self, buf: &TextBuffer) {
        self.position = self.position.min(buf.len());
    }

    /// The caret's offset and line.
    #[must_use]
    pub fn current(&self, buf: &TextBuffer) -> CaretPosition {
        let line = buf.find_line_at(self.position);
        CaretPosition {
            offset: self.position.min(buf.len()),
            line_start: line.start,
            line_end: line.end,
            line_text: line.text.clone(),
        }
    }

    /// 0-based line number.
    #[must_use]
    pub fn line_index(&self, buf: &TextBuffer) -> usize {
        buf.line_index_of(self.position)
    }

    /// Distance from the start of the caret's line.
    #[must_use]
    pub fn column(&self, buf: &TextBuffer) -> usize {
        self.position.min(buf.len()) - buf.find_line_at(self.position).start
    }

    // -- Horizontal ---------------------------------------------------------

    pub const fn move_left(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub fn move_right(&mut self, buf: &TextBuffer) {
        if self.position < buf.len() {
            self.position += 1;
        }
    }

    pub fn move_to_previous_word(&mut self, buf: &TextBuffer) {
        self.position = word::previous_word_start(buf, self.position);
    }

    pub fn move_to_next_word(&mut self, buf: &TextBuffer) {
        self.position = word::next_word_end(buf, self.position);
    }

    pub fn move_to_line_start(&mut self, buf: &TextBuffer) {
        self.position = buf.find_line_at(self.position).start;
    }

    pub fn move_to_line_end(&mut self, buf: &TextBuffer) {
        self.position = buf.find_line_at(self.position).end;
    }

    // -- Vertical -----------------------------------------------------------

    /// Move to the same column on the previous line.
    pub fn move_up_preserve_column(&mut self, buf: &TextBuffer) {
        let line = buf.find_line_at(self.position);
        let column = self.position.min(buf.len()) - line.start;
        if let Some(prev) = buf.find_previous_line(line) {
            self.position = prev.start + column.min(prev.len());
        }
    }

    /// Move to the same column on the next line.
    pub fn move_down_preserve_column(&mut self, buf: &TextBuffer) {
        let line = buf.find_line_at(self.position);
        let column = self.position.min(buf.len()) - line.start;
        if let Some(next) = buf.find_next_line(line) {
            self.position = next.start + column.min(next.len());
        }
    }

    pub fn move_to_previous_line_start(&mut self, buf: &TextBuffer) {
        let line = buf.find_line_at(self.position);
        if let Some(prev) = buf.find_previous_line(line) {
            self.position = prev.start;
        }
    }

    pub fn move_to_next_line_end(&mut self, buf: &TextBuffer) {
        let line = buf.find_line_at(self.position);
        if let Some(next) = buf.find_next_line(line) {
            self.position = next.end;
        }
    }

    // -- Document -----------------------------------------------------------

    pub const fn move_to_text_start(&mut self) {
        self.position = 0;
    }

    pub fn move_to_text_end(&mut self, buf: &TextBuffer) {
        self.position = buf.len();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(text: &str, pos: usize) -> (TextBuffer, CaretModel) {
        let buf = TextBuffer::from_text(text);
        let mut caret = CaretModel::new();
        caret.move_to(pos, &buf);
        (buf, caret)
    }

    #[test]
    fn move_to_clamps() {
        let (buf, mut caret) = at("abc", 0);
        caret.move_to(10, &buf);
        assert_eq!(caret.position(), 3);
    }

    #[test]
    fn left_right_clamp_at_bounds() {
        let (buf, mut caret) = at("ab", 0);
        caret.move_left();
        assert_eq!(caret.position(), 0);
        caret.move_right(&buf);
        caret.move_right(&buf);
        caret.move_right(&buf);
        assert_eq!(caret.position(), 2);
    }

    #[test]
    fn current_describes_line() {
        let (buf, caret) = at("one\ntwo", 5);
        assert_eq!(
            caret.current(&buf),
            CaretPosition {
                offset: 5,
                line_start: 4,
                line_end: 7,
                line_text: "two".to_string(),
            }
        );
        assert_eq!(caret.current(&buf).column(), 1);
        assert_eq!(caret.line_index(&buf), 1);
    }

    #[test]
    fn up_keeps_column() {
        let (buf, mut caret) = at("abcdef\nxyz", 9);
        caret.move_up_preserve_column(&buf);
        assert_eq!(caret.position(), 2);
    }

    #[test]
    fn down_clips_to_shorter_line() {
        let (buf, mut caret) = at("abcdef\nxy", 5);
        caret.move_down_preserve_column(&buf);
        assert_eq!(caret.position(), 9);
    }

    #[test]
    fn up_on_first_line_is_noop() {
        let (buf, mut caret) = at("abc\ndef", 2);
        caret.move_up_preserve_column(&buf);
        assert_eq!(caret.position(), 2);
    }

    #[test]
    fn down_on_last_line_is_noop() {
        let (buf, mut caret) = at("abc\ndef", 5);
        caret.move_down_preserve_column(&buf);
        assert_eq!(caret.position(), 5);
    }

    #[test]
    fn down_onto_empty_line() {
        let (buf, mut caret) = at("abc\n\nxyz", 2);
        caret.move_down_preserve_column(&buf);
        assert_eq!(caret.position(), 4);
        caret.move_down_preserve_column(&buf);
        assert_eq!(caret.position(), 5);
    }

    #[test]
    fn line_start_and_end() {
        let (buf, mut caret) = at("one\ntwo\nthree", 6);
        caret.move_to_line_start(&buf);
        assert_eq!(caret.position(), 4);
        caret.move_to_line_end(&buf);
        assert_eq!(caret.position(), 7);
    }

    #[test]
    fn adjacent_line_jumps() {
        let (buf, mut caret) = at("one\ntwo\nthree", 6);
        caret.move_to_previous_line_start(&buf);
        assert_eq!(caret.position(), 0);
        caret.move_to_previous_line_start(&buf);
        assert_eq!(caret.position(), 0);

        caret.move_to(5, &buf);
        caret.move_to_next_line_end(&buf);
        assert_eq!(caret.position(), 13);
    }

    #[test]
    fn text_start_and_end() {
        let (buf, mut caret) = at("one\ntwo", 2);
        caret.move_to_text_end(&buf);
        assert_eq!(caret.position(), 7);
        caret.move_to_text_start();
        assert_eq!(caret.position(), 0);
    }

    #[test]
    fn word_moves_delegate() {
        let (buf, mut caret) = at("foo  bar", 8);
        caret.move_to_previous_word(&buf);
        assert_eq!(caret.position(), 5);
        caret.move_to_previous_word(&buf);
        assert_eq!(caret.position(), 0);
        caret.move_to_next_word(&buf);
        assert_eq!(caret.position(), 3);
    }

    #[test]
    fn clamp_after_external_delete() {
        let (mut buf, mut caret) = at("abcdef", 6);
        buf.delete_range(2, 6);
        caret.clamp(&buf);
        assert_eq!(caret.position(), 2);
    }
}
