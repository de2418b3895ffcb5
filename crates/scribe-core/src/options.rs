//! Text area configuration.
//!
//! Every knob the widget exposes, loadable from TOML. All keys are
//! optional; unknown keys are rejected so typos surface as errors instead
//! of silently doing nothing.
//!
//! ```toml
//! padding = 8
//! theme = "dark"
//! line_numbers = false
//!
//! [colors]
//! selection = "#264f78"
//!
//! [syntax]
//! keyword = "#c586c0"
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use scribe_paint::color::Color;
use scribe_theme::{Theme, ThemeColors, TokenKind, builtin_theme};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::timing::RepeatConfig;

// ---------------------------------------------------------------------------
// TextAreaOptions
// ---------------------------------------------------------------------------

/// Widget configuration. `Default` gives the stock look and feel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextAreaOptions {
    /// Space between the widget edge and the text, in pixels.
    pub padding: i32,
    pub caret_width: i32,
    /// Half-period of the caret blink. 0 disables blinking.
    pub caret_blink_ms: u64,

    // ── Key repeat ──────────────────────────────────────────────
    pub repeat_initial_delay_ms: u64,
    pub repeat_acceleration: f64,
    pub repeat_min_delay_ms: u64,

    pub multi_click_timeout_ms: u64,

    // ── Scroll bars ─────────────────────────────────────────────
    pub scroll_bar_width: i32,
    pub scroll_bar_min_thumb: i32,
    pub scroll_bar_corner_radius: i32,

    // ── Line numbers ────────────────────────────────────────────
    pub line_numbers: bool,
    pub line_numbers_padding: i32,

    // ── Colors ──────────────────────────────────────────────────
    /// Builtin theme the overrides apply on top of.
    pub theme: String,
    pub colors: ColorOverrides,
    /// Token kind name to color, e.g. `keyword = "#0033b3"`.
    pub syntax: BTreeMap<String, String>,
}

impl Default for TextAreaOptions {
    fn default() -> Self {
        Self {
            padding: 5,
            caret_width: 2,
            caret_blink_ms: 500,
            repeat_initial_delay_ms: 250,
            repeat_acceleration: 0.8,
            repeat_min_delay_ms: 1,
            multi_click_timeout_ms: 500,
            scroll_bar_width: 15,
            scroll_bar_min_thumb: 15,
            scroll_bar_corner_radius: 4,
            line_numbers: true,
            line_numbers_padding: 5,
            theme: "light".to_string(),
            colors: ColorOverrides::default(),
            syntax: BTreeMap::new(),
        }
    }
}

impl TextAreaOptions {
    /// Parse options from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed TOML, unknown keys, or
    /// mistyped values.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse an options file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file can't be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let options = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), theme = %options.theme, "loaded options");
        Ok(options)
    }

    /// The configured builtin theme with every override applied.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownTheme`] for a theme name that isn't builtin,
    /// [`Error::UnknownTokenKind`] for a `[syntax]` key that names no token
    /// kind, and [`Error::InvalidColor`] for a value that isn't a hex color.
    pub fn resolve_theme(&self) -> Result<Theme> {
        let mut theme =
            builtin_theme(&self.theme).ok_or_else(|| Error::UnknownTheme(self.theme.clone()))?;
        self.colors.apply(&mut theme.colors)?;

        for (name, value) in &self.syntax {
            let kind =
                TokenKind::from_name(name).ok_or_else(|| Error::UnknownTokenKind(name.clone()))?;
            let color = parse_color(&format!("syntax.{name}"), value)?;
            theme.syntax.set(kind, Some(color));
        }
        Ok(theme)
    }

    #[must_use]
    pub const fn repeat_config(&self) -> RepeatConfig {
        RepeatConfig::from_millis(
            self.repeat_initial_delay_ms,
            self.repeat_acceleration,
            self.repeat_min_delay_ms,
        )
    }

    #[must_use]
    pub const fn caret_blink_interval(&self) -> Duration {
        Duration::from_millis(self.caret_blink_ms)
    }

    #[must_use]
    pub const fn multi_click_timeout(&self) -> Duration {
        Duration::from_millis(self.multi_click_timeout_ms)
    }
}

// ---------------------------------------------------------------------------
// ColorOverrides
// ---------------------------------------------------------------------------

/// Optional hex colors replacing individual theme fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorOverrides {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub selection: Option<String>,
    pub caret: Option<String>,
    pub scroll_bar: Option<String>,
    pub scroll_bar_hover: Option<String>,
    pub scroll_bar_drag: Option<String>,
    pub scroll_bar_background: Option<String>,
    pub line_numbers_text: Option<String>,
    pub line_numbers_background: Option<String>,
}

impl ColorOverrides {
    /// `(field name, override)` pairs in [`ThemeColors::FIELDS`] order.
    fn entries(&self) -> [(&'static str, Option<&str>); 10] {
        [
            ("background", self.background.as_deref()),
            ("foreground", self.foreground.as_deref()),
            ("selection", self.selection.as_deref()),
            ("caret", self.caret.as_deref()),
            ("scroll_bar", self.scroll_bar.as_deref()),
            ("scroll_bar_hover", self.scroll_bar_hover.as_deref()),
            ("scroll_bar_drag", self.scroll_bar_drag.as_deref()),
            ("scroll_bar_background", self.scroll_bar_background.as_deref()),
            ("line_numbers_text", self.line_numbers_text.as_deref()),
            ("line_numbers_background", self.line_numbers_background.as_deref()),
        ]
    }

    /// Overwrite every field that has an override.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidColor`] on the first value that doesn't parse;
    /// `colors` is left partially updated.
    pub fn apply(&self, colors: &mut ThemeColors) -> Result<()> {
        for (field, value) in self.entries() {
            let Some(value) = value else { continue };
            let color = parse_color(field, value)?;
            if let Some(slot) = colors.field_mut(field) {
                *slot = color;
            }
        }
        Ok(())
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color> {
    Color::hex(value).ok_or_else(|| Error::InvalidColor {
        field: field.to_string(),
        value: value.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
