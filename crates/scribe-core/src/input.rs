//! Input events delivered to the text area.
//!
//! Backend-neutral: a windowing layer translates its native key, pointer
//! and focus notifications into [`Event`]s and hands them to
//! [`TextArea::handle_event`](crate::text_area::TextArea::handle_event).
//! Pointer coordinates are pixels relative to the widget's top-left corner.

use std::time::{Duration, Instant};

use bitflags::bitflags;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// One input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A key went down, auto-repeated, or went up.
    Key(KeyEvent),
    /// A pointer button, motion, leave or wheel event.
    Pointer(PointerEvent),
    /// Text dropped or pasted by the platform, delivered as one insert.
    Paste(String),
    FocusGained,
    FocusLost,
}

/// A keyboard event with key identity, modifiers, and press state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A key press.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            code,
            modifiers,
            kind: KeyEventKind::Press,
        }
    }

    /// A key release.
    #[must_use]
    pub const fn release(code: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            code,
            modifiers,
            kind: KeyEventKind::Release,
        }
    }
}

/// Key press / repeat / release distinction.
///
/// Platform auto-repeat events (`Repeat`) are ignored for keys the widget
/// repeats itself (Backspace, Delete, undo, redo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A Unicode character (printable).
    Char(char),

    // ── Named keys ──────────────────────────────────────────────
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,

    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const SUPER = 0b0000_1000;
        const HYPER = 0b0001_0000;
        const META  = 0b0010_0000;
    }
}

impl Modifiers {
    /// The shortcut modifier: Ctrl on most platforms, Super (Cmd) on macOS.
    /// Either one counts.
    #[must_use]
    pub const fn command(self) -> bool {
        self.intersects(Self::CTRL.union(Self::SUPER))
    }

    #[must_use]
    pub const fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    #[must_use]
    pub const fn alt(self) -> bool {
        self.contains(Self::ALT)
    }
}

/// A pointer event with position and modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// Pixels from the widget's left edge.
    pub x: i32,
    /// Pixels from the widget's top edge.
    pub y: i32,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::empty(),
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Pointer event classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEventKind {
    Press(PointerButton),
    Release(PointerButton),
    /// Moved while a button is held.
    Drag(PointerButton),
    /// Moved without any button held.
    Move,
    /// Left the widget.
    Leave,
    /// Wheel or trackpad scroll, in lines. Positive `dy` scrolls down.
    Scroll { dx: f32, dy: f32 },
}

/// Pointer button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

// ---------------------------------------------------------------------------
// ClickCounter
// ---------------------------------------------------------------------------

/// Counts consecutive presses for double- and triple-click.
///
/// A press within `timeout` of the previous one continues the sequence.
/// The count runs 1, 2, 3 and then starts again at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickCounter {
    timeout: Duration,
    count: u8,
    last: Option<Instant>,
}

impl ClickCounter {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            count: 0,
            last: None,
        }
    }

    /// Register a press at `now` and return its click number (1 to 3).
    pub fn press(&mut self, now: Instant) -> u8 {
        let continues = self
            .last
            .is_some_and(|last| now.saturating_duration_since(last) <= self.timeout);
        self.count = if continues { self.count + 1 } else { 1 };
        self.last = Some(now);

        let clicks = self.count;
        if clicks >= 3 {
            self.count = 0;
        }
        clicks
    }

    /// The click number of the most recent press, or 0 after a triple.
    #[must_use]
    pub const fn count(&self) -> u8 {
        self.count
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_ctrl_or_super() {
        assert!(Modifiers::CTRL.command());
        assert!(Modifiers::SUPER.command());
        assert!((Modifiers::SUPER | Modifiers::SHIFT).command());
        assert!(!Modifiers::ALT.command());
        assert!(!Modifiers::empty().command());
    }

    #[test]
    fn key_event_constructors() {
        let press = KeyEvent::new(KeyCode::Backspace, Modifiers::empty());
        assert_eq!(press.kind, KeyEventKind::Press);
        let release = KeyEvent::release(KeyCode::Backspace, Modifiers::empty());
        assert_eq!(release.kind, KeyEventKind::Release);
    }

    #[test]
    fn pointer_event_modifiers() {
        let ev = PointerEvent::new(PointerEventKind::Press(PointerButton::Left), 3, 4)
            .with_modifiers(Modifiers::SHIFT);
        assert!(ev.modifiers.shift());
        assert_eq!((ev.x, ev.y), (3, 4));
    }

    // -- ClickCounter -------------------------------------------------------

    #[test]
    fn clicks_within_timeout_accumulate() {
        let t0 = Instant::now();
        let mut clicks = ClickCounter::new(Duration::from_millis(500));
        assert_eq!(clicks.press(t0), 1);
        assert_eq!(clicks.press(t0 + Duration::from_millis(200)), 2);
        assert_eq!(clicks.press(t0 + Duration::from_millis(400)), 3);
    }

    #[test]
    fn fourth_click_starts_over() {
        let t0 = Instant::now();
        let mut clicks = ClickCounter::new(Duration::from_millis(500));
        for n in 0..3 {
            clicks.press(t0 + Duration::from_millis(n * 100));
        }
        assert_eq!(clicks.count(), 0);
        assert_eq!(clicks.press(t0 + Duration::from_millis(350)), 1);
    }

    #[test]
    fn slow_clicks_are_single() {
        let t0 = Instant::now();
        let mut clicks = ClickCounter::new(Duration::from_millis(500));
        assert_eq!(clicks.press(t0), 1);
        assert_eq!(clicks.press(t0 + Duration::from_millis(501)), 1);
    }
}
