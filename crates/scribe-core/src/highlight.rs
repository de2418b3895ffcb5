//! Syntax highlighting: pluggable tokenizers.
//!
//! The renderer asks a [`SyntaxHighlighter`] to split each visible
//! substring into [`Token`]s and draws every token in its kind's color.
//! Coloring is decoration only: tokens never change the buffer, and the
//! renderer rejects any token list that doesn't reproduce its input
//! exactly (see [`tokens_tile`]), drawing that line plain instead.
//!
//! # Tree-sitter
//!
//! [`RustHighlighter`] parses the fragment with tree-sitter-rust and runs
//! the grammar's bundled highlight query. Captures are painted onto a
//! per-byte kind table, later captures overriding earlier ones, and runs of
//! equal kind are coalesced into tokens. Every byte belongs to exactly one
//! run, so the output always tiles the input.
//!
//! Fragments are parsed in isolation. A line that opens a block comment or
//! string is highlighted as if the construct ended at the line end.

use std::fmt;
use std::path::Path;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

pub use scribe_theme::TokenKind;

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A classified run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Plain, text)
    }
}

/// Whether `tokens` concatenate to exactly `text`.
#[must_use]
pub fn tokens_tile(text: &str, tokens: &[Token]) -> bool {
    let mut rest = text;
    for token in tokens {
        match rest.strip_prefix(token.text.as_str()) {
            Some(r) => rest = r,
            None => return false,
        }
    }
    rest.is_empty()
}

// ---------------------------------------------------------------------------
// SyntaxHighlighter
// ---------------------------------------------------------------------------

/// Splits text into classified tokens.
///
/// Implementations should return tokens whose texts concatenate to the
/// input. Output that doesn't is ignored by the renderer.
pub trait SyntaxHighlighter {
    fn highlight(&mut self, text: &str) -> Vec<Token>;
}

// ---------------------------------------------------------------------------
// Language detection
// ---------------------------------------------------------------------------

/// Detect the language name from a file extension.
#[must_use]
pub fn detect_language(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()? {
        "rs" => Some("rust"),
        _ => None,
    }
}

/// A highlighter for a language name returned by [`detect_language`].
#[must_use]
pub fn highlighter_for_language(name: &str) -> Option<Box<dyn SyntaxHighlighter>> {
    match name {
        "rust" => RustHighlighter::new().map(|h| Box::new(h) as Box<dyn SyntaxHighlighter>),
        _ => None,
    }
}

/// A highlighter chosen by the file's extension.
#[must_use]
pub fn highlighter_for_path(path: &Path) -> Option<Box<dyn SyntaxHighlighter>> {
    highlighter_for_language(detect_language(path)?)
}

// ---------------------------------------------------------------------------
// RustHighlighter
// ---------------------------------------------------------------------------

/// Tree-sitter highlighter for Rust source.
pub struct RustHighlighter {
    parser: Parser,
    query: Query,
    /// Token kind for each capture index. `None` = leave plain.
    capture_kinds: Vec<Option<TokenKind>>,
}

impl RustHighlighter {
    /// Returns `None` if the grammar or its query fails to load.
    #[must_use]
    pub fn new() -> Option<Self> {
        let language: tree_sitter::Language = tree_sitter_rust::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language).ok()?;
        let query = Query::new(&language, tree_sitter_rust::HIGHLIGHTS_QUERY).ok()?;
        let capture_kinds = query
            .capture_names()
            .iter()
            .map(|name| capture_kind(name))
            .collect();
        Some(Self {
            parser,
            query,
            capture_kinds,
        })
    }
}

impl SyntaxHighlighter for RustHighlighter {
    fn highlight(&mut self, text: &str) -> Vec<Token> {
        if text.is_empty() {
            return Vec::new();
        }
        let Some(tree) = self.parser.parse(text, None) else {
            return vec![Token::plain(text)];
        };

        let mut kinds: Vec<Option<TokenKind>> = vec![None; text.len()];
        let mut cursor = QueryCursor::new();
        let mut captures = cursor.captures(&self.query, tree.root_node(), text.as_bytes());
        while let Some((m, _capture_idx)) = captures.next() {
            for capture in m.captures {
                let Some(kind) = self.capture_kinds[capture.index as usize] else {
                    continue;
                };
                let range = capture.node.byte_range();
                let end = range.end.min(text.len());
                let start = range.start.min(end);
                // Later captures (more specific patterns) win.
                for slot in &mut kinds[start..end] {
                    *slot = Some(kind);
                }
            }
        }

        coalesce(text, &kinds)
    }
}

impl fmt::Debug for RustHighlighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RustHighlighter")
            .field("captures", &self.capture_kinds.len())
            .finish_non_exhaustive()
    }
}

/// Map a highlight-query capture name to a token kind.
fn capture_kind(name: &str) -> Option<TokenKind> {
    Some(match name {
        "keyword" => TokenKind::Keyword,
        "string" | "escape" => TokenKind::String,
        "constant.builtin" => TokenKind::Number,
        "comment" | "comment.documentation" => TokenKind::Comment,
        "attribute" => TokenKind::Annotation,
        "type" | "type.builtin" | "constructor" | "constant" => TokenKind::Type,
        "function" | "function.method" | "function.macro" => TokenKind::Method,
        "operator" => TokenKind::Operator,
        _ => return None,
    })
}

/// Turn a per-byte kind table into tokens, one per run of equal kind.
///
/// The kind of a char is the kind of its first byte.
fn coalesce(text: &str, kinds: &[Option<TokenKind>]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut run: Option<(usize, TokenKind)> = None;

    for (i, _) in text.char_indices() {
        let kind = kinds[i].unwrap_or_default();
        match run {
            Some((_, current)) if current == kind => {}
            Some((start, current)) => {
                tokens.push(Token::new(current, &text[start..i]));
                run = Some((i, kind));
            }
            None => run = Some((i, kind)),
        }
    }
    if let Some((start, kind)) = run {
        tokens.push(Token::new(kind, &text[start..]));
    }
    tokens
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
