//! # scribe-theme — color themes for the scribe text area
//!
//! A [`Theme`] is everything the widget needs to pick a color:
//!
//! ```text
//! Theme
//!  ├── ThemeColors   background, text, selection, caret, scroll bar, gutter
//!  └── SyntaxColors  one optional color per TokenKind
//! ```
//!
//! Two themes are built in (`light` and `dark`, see [`builtin`]). Anything
//! else is a builtin with some fields overridden by configuration.

pub mod builtin;
pub mod syntax;
pub mod theme;

pub use builtin::{builtin_names, builtin_theme};
pub use syntax::{SyntaxColors, TokenKind};
pub use theme::{Theme, ThemeColors};
