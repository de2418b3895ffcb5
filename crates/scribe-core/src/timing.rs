//! Time-driven behavior: caret blinking and accelerating key repeat.
//!
//! Nothing here owns a thread or a timer. The host calls
//! [`TextArea::tick`](crate::text_area::TextArea::tick) with the current
//! `Instant` whenever [`next_deadline`](crate::text_area::TextArea::next_deadline)
//! comes due, and these state machines decide what fires.
//!
//! # Key repeat
//!
//! A held key fires once on press, once more after the initial delay, and
//! then ever faster:
//!
//! ```text
//! delay(t) = clamp(initial · e^(−accel · t) + min, min, initial)
//! ```
//!
//! where `t` is the hold time in seconds. With the defaults (250 ms, 0.8,
//! 1 ms) the delay is ~113 ms after one second and reaches the floor after
//! about seven.

use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// RepeatConfig
// ---------------------------------------------------------------------------

/// Parameters of the decaying repeat delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatConfig {
    pub initial_delay: Duration,
    /// Decay rate per second of hold time.
    pub acceleration: f64,
    pub min_delay: Duration,
}

impl RepeatConfig {
    #[must_use]
    pub const fn from_millis(initial_delay: u64, acceleration: f64, min_delay: u64) -> Self {
        Self {
            initial_delay: Duration::from_millis(initial_delay),
            acceleration,
            min_delay: Duration::from_millis(min_delay),
        }
    }

    /// The delay before the next repeat after holding for `elapsed`.
    ///
    /// Whole milliseconds, always within `[min_delay, initial_delay]`.
    #[must_use]
    // Millisecond delays are small and non-negative.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn delay_after(&self, elapsed: Duration) -> Duration {
        let initial = self.initial_delay.as_secs_f64() * 1000.0;
        let min = self.min_delay.as_secs_f64() * 1000.0;
        let factor = (-self.acceleration * elapsed.as_secs_f64()).exp();
        let millis = (initial * factor + min).max(0.0) as u64;
        let lo = self.min_delay.min(self.initial_delay);
        Duration::from_millis(millis).clamp(lo, self.initial_delay)
    }
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self::from_millis(250, 0.8, 1)
    }
}

// ---------------------------------------------------------------------------
// RepeatableAction
// ---------------------------------------------------------------------------

/// A held key that keeps firing until released.
///
/// `K` identifies what repeats (a key code, a command). Releasing is
/// dropping the value; a dropped action can't fire again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatableAction<K> {
    key: K,
    config: RepeatConfig,
    pressed_at: Instant,
    next_fire: Instant,
}

impl<K> RepeatableAction<K> {
    /// Begin repeating `key`. The caller performs the first firing itself.
    #[must_use]
    pub fn start(key: K, config: RepeatConfig, now: Instant) -> Self {
        Self {
            key,
            config,
            pressed_at: now,
            next_fire: now + config.initial_delay,
        }
    }

    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// When the next repeat is due.
    #[must_use]
    pub const fn next_fire(&self) -> Instant {
        self.next_fire
    }

    /// Returns `true` if a repeat is due, and schedules the one after it.
    ///
    /// Fires at most once per call, so a stalled host doesn't replay a
    /// burst of repeats.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_fire {
            return false;
        }
        let delay = self.config.delay_after(now.saturating_duration_since(self.pressed_at));
        self.next_fire = now + delay;
        true
    }
}

// ---------------------------------------------------------------------------
// CaretBlink
// ---------------------------------------------------------------------------

/// Caret visibility toggling on a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretBlink {
    interval: Duration,
    visible: bool,
    /// `None` while stopped.
    next_toggle: Option<Instant>,
}

impl CaretBlink {
    /// A stopped (hidden) blinker. A zero interval never toggles.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            visible: false,
            next_toggle: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next_toggle.is_some() || (self.visible && self.interval.is_zero())
    }

    /// Show the caret and start a fresh interval. Called after every
    /// caret movement or edit so the caret is solid while the user acts.
    pub fn restart(&mut self, now: Instant) {
        self.visible = true;
        self.next_toggle = if self.interval.is_zero() {
            None
        } else {
            Some(now + self.interval)
        };
    }

    /// Hide the caret and stop toggling.
    pub const fn stop(&mut self) {
        self.visible = false;
        self.next_toggle = None;
    }

    /// Toggle if due. Returns whether visibility changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.next_toggle {
            Some(due) if now >= due => {
                self.visible = !self.visible;
                self.next_toggle = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.next_toggle
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
