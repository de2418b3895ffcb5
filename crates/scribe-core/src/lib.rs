//! # scribe-core — editing engine for the scribe text area
//!
//! The models, bottom-up:
//!
//! - **[`buffer`]**: `TextBuffer` over a rope, with character offsets, a line index and file I/O
//! - **[`caret`]** / **[`selection`]**: caret motions and the anchored selection
//! - **[`history`]**: `UndoManager` of reversible insert/delete records
//! - **[`scroll`]** / **[`scrollbar`]**: scroll offsets, thumb geometry, drags
//! - **[`highlight`]**: `SyntaxHighlighter` trait and the tree-sitter Rust highlighter
//! - **[`render`]** / **[`gutter`]**: painting onto a `scribe_paint::Surface`
//! - **[`timing`]** / **[`input`]**: key repeat, caret blink, events, click counting
//! - **[`text_area`]**: `TextArea`, the widget that wires all of the above together
//!
//! Offsets are always in characters (Unicode scalar values), never bytes.

pub mod buffer;
pub mod caret;
pub mod clipboard;
pub mod error;
pub mod gutter;
pub mod highlight;
pub mod history;
pub mod input;
pub mod options;
pub mod render;
pub mod scroll;
pub mod scrollbar;
pub mod selection;
pub mod text_area;
pub mod timing;
pub mod word;

pub use buffer::TextBuffer;
pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard, default_clipboard};
pub use error::{Error, Result};
pub use highlight::{SyntaxHighlighter, Token, highlighter_for_path};
pub use input::{Event, KeyCode, KeyEvent, Modifiers, PointerButton, PointerEvent, PointerEventKind};
pub use options::TextAreaOptions;
pub use text_area::{Layout, TextArea};
