//! Clipboard access for copy, cut and paste.
//!
//! The widget talks to a [`Clipboard`] trait object so tests and headless
//! hosts can swap the system clipboard for [`MemoryClipboard`]. Clipboard
//! failures are never fatal to editing: a failed read pastes nothing and a
//! failed write leaves the buffer alone.

use crate::error::Result;

/// Plain-text clipboard.
pub trait Clipboard {
    /// Current clipboard text, or `None` if it is empty, not text, or
    /// unreadable.
    fn get_text(&mut self) -> Option<String>;

    /// Replace the clipboard contents.
    fn set_text(&mut self, text: &str);
}

// ---------------------------------------------------------------------------
// SystemClipboard
// ---------------------------------------------------------------------------

/// The platform clipboard, through `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    /// Open the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Clipboard`](crate::Error::Clipboard) if no clipboard
    /// is reachable (headless session, no display server).
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
        })
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        match self.inner.get_text() {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::debug!(%err, "clipboard read failed");
                None
            }
        }
    }

    fn set_text(&mut self, text: &str) {
        if let Err(err) = self.inner.set_text(text) {
            tracing::debug!(%err, "clipboard write failed");
        }
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// MemoryClipboard
// ---------------------------------------------------------------------------

/// In-process clipboard. Used when the system one is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    content: Option<String>,
}

impl MemoryClipboard {
    #[must_use]
    pub const fn new() -> Self {
        Self { content: None }
    }

    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            content: Some(text.to_string()),
        }
    }

    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.content.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.content = Some(text.to_string());
    }
}

/// The system clipboard if it can be opened, an in-memory one otherwise.
#[must_use]
pub fn default_clipboard() -> Box<dyn Clipboard> {
    match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(err) => {
            tracing::debug!(%err, "falling back to in-memory clipboard");
            Box::new(MemoryClipboard::new())
        }
    }
}
