//! Word navigation: whitespace-delimited words with newline stops.
//!
//! A **word** is a maximal run of non-whitespace characters. Punctuation is
//! part of the word it touches: `foo.bar()` is one word.
//!
//! Newlines are hard stops in both directions:
//!
//! | From | Motion | Lands |
//! |------|--------|-------|
//! | start of a line | back | end of the previous line |
//! | after leading blanks | back | start of the line |
//! | end of a word, blanks then `\n` ahead | forward | start of the next line |
//!
//! All functions take and return char offsets and clamp out-of-range input.

use crate::buffer::{NEWLINE, TextBuffer};

// ---------------------------------------------------------------------------
// Character classification
// ---------------------------------------------------------------------------

/// Character class for word boundary detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    /// Any non-whitespace character.
    Word,
    /// Whitespace within a line.
    Blank,
    /// The line separator.
    Newline,
}

pub(crate) fn classify(ch: char) -> CharClass {
    if ch == NEWLINE {
        CharClass::Newline
    } else if ch.is_whitespace() {
        CharClass::Blank
    } else {
        CharClass::Word
    }
}

fn class_at(buf: &TextBuffer, pos: usize) -> Option<CharClass> {
    buf.char_at(pos).map(classify)
}

fn is_word_at(buf: &TextBuffer, pos: usize) -> bool {
    class_at(buf, pos) == Some(CharClass::Word)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Where "previous word" lands from `pos`.
#[must_use]
pub fn previous_word_start(buf: &TextBuffer, pos: usize) -> usize {
    let pos = pos.min(buf.len());
    if pos == 0 {
        return 0;
    }

    let mut p = pos - 1;
    if p > 0 && class_at(buf, p) == Some(CharClass::Newline) {
        return p;
    }

    while p > 0 {
        match class_at(buf, p) {
            Some(CharClass::Newline) => return p + 1,
            Some(CharClass::Blank) => p -= 1,
            _ => break,
        }
    }

    while p > 0 && is_word_at(buf, p - 1) {
        p -= 1;
    }
    p
}

/// Where "next word" lands from `pos`.
#[must_use]
pub fn next_word_end(buf: &TextBuffer, pos: usize) -> usize {
    let len = buf.len();
    let mut p = pos.min(len);
    if p == len {
        return len;
    }

    // Inside a word: finish it.
    if is_word_at(buf, p) {
        while p < len && is_word_at(buf, p) {
            p += 1;
        }
        return p;
    }

    while p < len {
        match class_at(buf, p) {
            Some(CharClass::Newline) => return p + 1,
            Some(CharClass::Blank) => p += 1,
            _ => break,
        }
    }
    while p < len && is_word_at(buf, p) {
        p += 1;
    }
    p
}

/// The word around `pos` as `(start, end)`.
///
/// Expands left and right over non-whitespace. On whitespace this still
/// picks up a word ending exactly at `pos`; an empty buffer gives `(0, 0)`.
#[must_use]
pub fn word_bounds_at(buf: &TextBuffer, pos: usize) -> (usize, usize) {
    let len = buf.len();
    let pos = pos.min(len);

    let mut start = pos;
    while start > 0 && is_word_at(buf, start - 1) {
        start -= 1;
    }
    let mut end = pos;
    while end < len && is_word_at(buf, end) {
        end += 1;
    }
    (start, end)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
