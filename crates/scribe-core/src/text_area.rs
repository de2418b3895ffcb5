//! The text area widget: every model wired to input, timers and paint.
//!
//! ```text
//!   Event ──► TextArea::handle_event ──► caret / selection / history
//!                                              │
//!                                              ▼
//!                                          TextBuffer
//!                                              │
//!   TextArea::paint ◄── layout ◄── scroll ◄────┘
//!        │
//!        ├── background
//!        ├── LineNumbersRenderer   gutter
//!        ├── TextRenderer          selection, text, caret
//!        └── ScrollBarModel        vertical, horizontal, corner
//! ```
//!
//! Each entry point mutates the models synchronously and raises a repaint
//! request (see [`take_repaint_request`](TextArea::take_repaint_request)).
//! Time comes in as explicit `Instant`s; the host calls
//! [`tick`](TextArea::tick) when [`next_deadline`](TextArea::next_deadline)
//! passes.
//!
//! Every text mutation is recorded in the undo history by the command that
//! makes it. Typing over a selection records a `Delete` and an `Insert`.

use std::fmt;
use std::path::Path;
use std::time::Instant;

use scribe_paint::geometry::{Point, Rect, Size};
use scribe_paint::metrics::FontMetrics;
use scribe_paint::surface::Surface;
use scribe_theme::Theme;

use crate::buffer::TextBuffer;
use crate::caret::CaretModel;
use crate::clipboard::Clipboard;
use crate::error::Result;
use crate::gutter::LineNumbersRenderer;
use crate::highlight::SyntaxHighlighter;
use crate::history::{TextAction, UndoManager};
use crate::input::{
    ClickCounter, Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerButton, PointerEvent,
    PointerEventKind,
};
use crate::options::TextAreaOptions;
use crate::render::{TextFrame, TextRenderer};
use crate::scroll::{Orientation, ScrollModel};
use crate::scrollbar::{ScrollBarHit, ScrollBarMetrics, ScrollBarModel, ScrollBarStyle};
use crate::selection::SelectionModel;
use crate::timing::{CaretBlink, RepeatConfig, RepeatableAction};

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Where each part of the widget goes, in widget coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Layout {
    pub gutter: Rect,
    /// The text viewport.
    pub text: Rect,
    pub vertical_bar: Option<Rect>,
    pub horizontal_bar: Option<Rect>,
    /// Full size of the laid-out text.
    pub content: Size,
}

impl Layout {
    #[must_use]
    pub const fn bar(&self, orientation: Orientation) -> Option<Rect> {
        match orientation {
            Orientation::Vertical => self.vertical_bar,
            Orientation::Horizontal => self.horizontal_bar,
        }
    }

    const fn viewport_extent(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Vertical => self.text.height,
            Orientation::Horizontal => self.text.width,
        }
    }

    const fn content_extent(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Vertical => self.content.height,
            Orientation::Horizontal => self.content.width,
        }
    }
}

const ORIENTATIONS: [Orientation; 2] = [Orientation::Vertical, Orientation::Horizontal];

/// Pointer coordinate along `orientation`.
const fn along(orientation: Orientation, p: Point) -> i32 {
    match orientation {
        Orientation::Vertical => p.y,
        Orientation::Horizontal => p.x,
    }
}

const fn track_start(orientation: Orientation, track: Rect) -> i32 {
    match orientation {
        Orientation::Vertical => track.y,
        Orientation::Horizontal => track.x,
    }
}

// ---------------------------------------------------------------------------
// Repeating commands
// ---------------------------------------------------------------------------

/// Commands that repeat while their key is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RepeatCommand {
    DeleteBackward,
    DeleteForward,
    Undo,
    Redo,
}

/// The held key and what it repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    code: KeyCode,
    command: RepeatCommand,
}

/// Case-insensitive key identity, so releasing `z` ends a `Z` repeat.
fn same_key(a: KeyCode, b: KeyCode) -> bool {
    match (a, b) {
        (KeyCode::Char(x), KeyCode::Char(y)) => x.to_lowercase().eq(y.to_lowercase()),
        _ => a == b,
    }
}

// ---------------------------------------------------------------------------
// TextArea
// ---------------------------------------------------------------------------

/// A scrollable, editable, syntax-colored text area.
pub struct TextArea {
    buffer: TextBuffer,
    caret: CaretModel,
    selection: SelectionModel,
    history: UndoManager,
    scroll: ScrollModel,

    renderer: TextRenderer,
    gutter: LineNumbersRenderer,
    scroll_bar: ScrollBarModel,
    theme: Theme,
    metrics: Box<dyn FontMetrics>,
    clipboard: Box<dyn Clipboard>,
    highlighter: Option<Box<dyn SyntaxHighlighter>>,

    blink: CaretBlink,
    repeat_config: RepeatConfig,
    repeat: Option<RepeatableAction<HeldKey>>,
    clicks: ClickCounter,
    /// Click number of the press in progress (1 to 3).
    press_clicks: u8,
    mouse_selecting: bool,
    focused: bool,

    size: Size,
    layout: Layout,
    /// Widest line plus padding; `None` after an edit.
    content_width: Option<i32>,
    text_version: u64,
    repaint: bool,
    on_text_changed: Option<Box<dyn FnMut()>>,
}

impl TextArea {
    /// Create an empty text area.
    #[must_use]
    pub fn new(
        options: &TextAreaOptions,
        theme: Theme,
        metrics: Box<dyn FontMetrics>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let colors = &theme.colors;
        let gutter = LineNumbersRenderer {
            visible: options.line_numbers,
            padding: options.line_numbers_padding,
            text_color: colors.line_numbers_text,
            background: colors.line_numbers_background,
        };
        let scroll_bar = ScrollBarModel {
            thickness: options.scroll_bar_width,
            min_thumb: options.scroll_bar_min_thumb,
            corner_radius: options.scroll_bar_corner_radius,
            style: ScrollBarStyle::from_theme(colors),
        };
        Self {
            buffer: TextBuffer::new(),
            caret: CaretModel::new(),
            selection: SelectionModel::new(),
            history: UndoManager::new(),
            scroll: ScrollModel::default(),
            renderer: TextRenderer::new(options.padding, options.caret_width),
            gutter,
            scroll_bar,
            theme,
            metrics,
            clipboard,
            highlighter: None,
            blink: CaretBlink::new(options.caret_blink_interval()),
            repeat_config: options.repeat_config(),
            repeat: None,
            clicks: ClickCounter::new(options.multi_click_timeout()),
            press_clicks: 0,
            mouse_selecting: false,
            focused: false,
            size: Size::default(),
            layout: Layout::default(),
            content_width: None,
            text_version: 0,
            repaint: true,
            on_text_changed: None,
        }
    }

    /// Create a text area themed by `options`.
    ///
    /// # Errors
    ///
    /// Fails when the configured theme or a color override is invalid; see
    /// [`TextAreaOptions::resolve_theme`].
    pub fn from_options(
        options: &TextAreaOptions,
        metrics: Box<dyn FontMetrics>,
        clipboard: Box<dyn Clipboard>,
    ) -> Result<Self> {
        let theme = options.resolve_theme()?;
        Ok(Self::new(options, theme, metrics, clipboard))
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[must_use]
    pub const fn caret(&self) -> &CaretModel {
        &self.caret
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    #[must_use]
    pub const fn history(&self) -> &UndoManager {
        &self.history
    }

    #[must_use]
    pub const fn scroll(&self) -> &ScrollModel {
        &self.scroll
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the caret is drawn this frame.
    #[must_use]
    pub const fn caret_visible(&self) -> bool {
        self.focused && self.blink.is_visible()
    }

    /// The clipboard used by copy, cut and paste.
    pub fn clipboard(&mut self) -> &mut dyn Clipboard {
        self.clipboard.as_mut()
    }

    /// The selected text, if any.
    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        self.selection.selected_text(&self.buffer)
    }

    /// Incremented once per edit.
    #[must_use]
    pub const fn text_version(&self) -> u64 {
        self.text_version
    }

    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    /// Returns whether a repaint was requested since the last call.
    pub const fn take_repaint_request(&mut self) -> bool {
        let requested = self.repaint;
        self.repaint = false;
        requested
    }

    /// The earliest instant at which [`tick`](Self::tick) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let repeat = self.repeat.as_ref().map(RepeatableAction::next_fire);
        match (self.blink.next_deadline(), repeat) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // -- Configuration ------------------------------------------------------

    /// Run `callback` after every edit.
    pub fn set_on_text_changed(&mut self, callback: impl FnMut() + 'static) {
        self.on_text_changed = Some(Box::new(callback));
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.gutter.text_color = theme.colors.line_numbers_text;
        self.gutter.background = theme.colors.line_numbers_background;
        self.scroll_bar.style = ScrollBarStyle::from_theme(&theme.colors);
        self.theme = theme;
        self.repaint = true;
    }

    pub fn set_syntax_highlighter(&mut self, highlighter: Option<Box<dyn SyntaxHighlighter>>) {
        self.highlighter = highlighter;
        self.repaint = true;
    }

    pub fn set_line_numbers_visible(&mut self, visible: bool) {
        if self.gutter.visible != visible {
            self.gutter.visible = visible;
            self.relayout();
            self.repaint = true;
        }
    }

    /// Resize the widget.
    pub fn set_size(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.relayout();
            self.repaint = true;
        }
    }

    // -- Document -----------------------------------------------------------

    /// The full text.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Replace the whole document. Clears undo history and selection and
    /// puts the caret at the end.
    pub fn set_text(&mut self, text: &str) {
        self.history.clear();
        self.selection.clear();
        self.buffer.set_text(text);
        self.caret.move_to_text_end(&self.buffer);
        self.text_changed();
    }

    /// Load a document from disk. The caret starts at the top.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`](crate::Error::Read) if the file can't be read;
    /// the current document is kept.
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        let buffer = TextBuffer::from_file(path)?;
        self.buffer = buffer;
        self.history.clear();
        self.selection.clear();
        self.caret = CaretModel::new();
        self.scroll = ScrollModel::default();
        self.text_changed();
        Ok(())
    }

    /// Write the document to disk and mark it saved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`](crate::Error::Write) on I/O failure.
    pub fn save_to_file(&mut self, path: &Path) -> Result<()> {
        self.buffer.save_to_file(path)
    }

    /// Put the caret at the start of 0-based line `index` (clamped) and
    /// scroll it into view.
    pub fn go_to_line(&mut self, index: usize) {
        let last = self.buffer.line_count() - 1;
        let start = self.buffer.line(index.min(last)).map_or(0, |l| l.start);
        self.selection.clear();
        self.caret.move_to(start, &self.buffer);
        self.ensure_caret_visible();
        self.repaint = true;
    }

    // -- Commands -----------------------------------------------------------

    /// Insert `text` at the caret, replacing the selection.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.selection
            .delete_selected_text(&mut self.buffer, &mut self.caret, Some(&mut self.history));

        let pos = self.caret.position();
        self.history.add_edit(TextAction::Insert {
            position: pos,
            text: text.to_string(),
            caret_before: pos,
        });
        self.buffer.insert_str(pos, text);
        self.caret.move_to(pos + text.chars().count(), &self.buffer);
        self.text_changed();
    }

    /// Backspace: delete the selection, or the character before the caret.
    pub fn delete_backward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let pos = self.caret.position();
        if pos == 0 {
            return false;
        }
        let ch = self.buffer.delete_char_at(pos - 1);
        self.history.add_edit(TextAction::Delete {
            position: pos - 1,
            text: ch.to_string(),
            caret_before: pos,
        });
        self.caret.move_left();
        self.text_changed();
        true
    }

    /// Delete: remove the selection, or the character after the caret.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let pos = self.caret.position();
        if pos >= self.buffer.len() {
            return false;
        }
        let ch = self.buffer.delete_char_at(pos);
        self.history.add_edit(TextAction::Delete {
            position: pos,
            text: ch.to_string(),
            caret_before: pos,
        });
        self.text_changed();
        true
    }

    pub fn undo(&mut self) -> bool {
        self.selection.clear();
        let done = self.history.undo(&mut self.buffer, &mut self.caret);
        if done {
            self.text_changed();
        }
        done
    }

    pub fn redo(&mut self) -> bool {
        self.selection.clear();
        let done = self.history.redo(&mut self.buffer, &mut self.caret);
        if done {
            self.text_changed();
        }
        done
    }

    /// Copy the selection. Returns `false` if nothing is selected.
    pub fn copy(&mut self) -> bool {
        match self.selection.selected_text(&self.buffer) {
            Some(text) => {
                self.clipboard.set_text(&text);
                true
            }
            None => false,
        }
    }

    /// Copy the selection and delete it.
    pub fn cut(&mut self) -> bool {
        self.copy() && self.delete_selection()
    }

    /// Insert the clipboard text, replacing the selection. One undo step
    /// for the insert, however long.
    pub fn paste(&mut self) -> bool {
        match self.clipboard.get_text() {
            Some(text) if !text.is_empty() => {
                self.insert_text(&text);
                true
            }
            _ => false,
        }
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.buffer);
        self.caret.move_to_text_end(&self.buffer);
        self.repaint = true;
    }

    fn delete_selection(&mut self) -> bool {
        let deleted = self.selection.delete_selected_text(
            &mut self.buffer,
            &mut self.caret,
            Some(&mut self.history),
        );
        if deleted {
            self.text_changed();
        }
        deleted
    }

    fn run_repeat(&mut self, command: RepeatCommand) {
        match command {
            RepeatCommand::DeleteBackward => self.delete_backward(),
            RepeatCommand::DeleteForward => self.delete_forward(),
            RepeatCommand::Undo => self.undo(),
            RepeatCommand::Redo => self.redo(),
        };
    }

    /// Bookkeeping after every edit.
    fn text_changed(&mut self) {
        self.text_version += 1;
        self.content_width = None;
        self.repaint = true;
        self.ensure_caret_visible();
        if let Some(callback) = self.on_text_changed.as_mut() {
            callback();
        }
    }

    // -- Layout and scrolling -----------------------------------------------

    /// The layout from the most recent relayout.
    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Recompute the layout and refresh scroll limits.
    ///
    /// Scroll bars take space from the text viewport, so showing one can
    /// make the other necessary.
    fn relayout(&mut self) -> Layout {
        let metrics = self.metrics.as_ref();
        let content_width = *self
            .content_width
            .get_or_insert_with(|| self.renderer.content_size(&self.buffer, metrics).width);
        let content = Size::new(
            content_width,
            self.renderer
                .content_height(self.buffer.line_count(), metrics.line_height()),
        );

        let gutter_width = self.gutter.width(self.buffer.line_count(), metrics);
        let bar = self.scroll_bar.thickness;
        let avail_w = (self.size.width - gutter_width).max(0);
        let avail_h = self.size.height.max(0);

        let mut vertical = content.height > avail_h;
        let horizontal = content.width > avail_w - if vertical { bar } else { 0 };
        if horizontal && !vertical {
            vertical = content.height > avail_h - bar;
        }

        let text_w = (avail_w - if vertical { bar } else { 0 }).max(0);
        let text_h = (avail_h - if horizontal { bar } else { 0 }).max(0);
        let text = Rect::new(gutter_width, 0, text_w, text_h);
        let layout = Layout {
            gutter: Rect::new(0, 0, gutter_width, text_h),
            text,
            vertical_bar: vertical.then_some(Rect::new(text.right(), 0, bar, text_h)),
            horizontal_bar: horizontal.then_some(Rect::new(gutter_width, text.bottom(), text_w, bar)),
            content,
        };

        self.scroll.vertical.update_extents(content.height, text_h);
        self.scroll.horizontal.update_extents(content.width, text_w);
        self.layout = layout;
        layout
    }

    /// Scroll so the caret's line and column are inside the viewport.
    pub fn ensure_caret_visible(&mut self) {
        let layout = self.relayout();
        let padding = self.renderer.padding;
        let caret = self
            .renderer
            .caret_rect(&self.buffer, self.metrics.as_ref(), self.caret.position());

        // Distances from the start of the text, padding excluded.
        let top = caret.y - padding;
        let left = caret.x + self.renderer.caret_width / 2 - padding;
        let slack = caret.height + 2 * padding;

        let v = &mut self.scroll.vertical;
        if top < v.offset() {
            v.scroll_to(top);
        } else if top + slack > v.offset() + layout.text.height {
            v.scroll_to(top + slack - layout.text.height);
        }

        let h = &mut self.scroll.horizontal;
        let slack = self.renderer.caret_width + 2 * padding;
        if left < h.offset() {
            h.scroll_to(left);
        } else if left + slack > h.offset() + layout.text.width {
            h.scroll_to(left + slack - layout.text.width);
        }
    }

    fn bar_metrics(&self, orientation: Orientation, layout: &Layout) -> ScrollBarMetrics {
        let axis = self.scroll.axis(orientation);
        self.scroll_bar.metrics(
            layout.viewport_extent(orientation),
            layout.content_extent(orientation),
            axis.offset(),
            axis.max(),
        )
    }

    /// Widget point to buffer offset.
    fn offset_at(&self, layout: &Layout, x: i32, y: i32) -> usize {
        let point = Point::new(
            x - layout.text.x + self.scroll.scroll_x(),
            y - layout.text.y + self.scroll.scroll_y(),
        );
        self.renderer
            .offset_at(&self.buffer, self.metrics.as_ref(), point)
    }

    // -- Keyboard -----------------------------------------------------------

    /// Handle a key press or repeat. Returns whether the key was used.
    pub fn key_down(&mut self, event: KeyEvent, now: Instant) -> bool {
        if event.kind == KeyEventKind::Release {
            self.key_up(event.code);
            return false;
        }
        let mods = event.modifiers;

        if let Some(command) = Self::repeat_command(event.code, mods) {
            // The widget runs its own repeat timer.
            if event.kind == KeyEventKind::Press {
                self.run_repeat(command);
                let held = HeldKey {
                    code: event.code,
                    command,
                };
                self.repeat = Some(RepeatableAction::start(held, self.repeat_config, now));
            }
            self.after_input(now);
            return true;
        }

        let handled = if mods.command() {
            self.command_key(event.code, mods)
        } else {
            self.plain_key(event.code, mods)
        };
        if handled {
            self.after_input(now);
        }
        handled
    }

    /// Handle a key release: stops the repeat it started.
    pub fn key_up(&mut self, code: KeyCode) {
        if self
            .repeat
            .as_ref()
            .is_some_and(|r| same_key(r.key().code, code))
        {
            self.repeat = None;
        }
    }

    fn repeat_command(code: KeyCode, mods: Modifiers) -> Option<RepeatCommand> {
        match code {
            KeyCode::Backspace => Some(RepeatCommand::DeleteBackward),
            KeyCode::Delete => Some(RepeatCommand::DeleteForward),
            KeyCode::Char(c) if mods.command() => match c.to_ascii_lowercase() {
                'z' if mods.shift() => Some(RepeatCommand::Redo),
                'z' => Some(RepeatCommand::Undo),
                'y' => Some(RepeatCommand::Redo),
                _ => None,
            },
            _ => None,
        }
    }

    /// Shortcuts with Ctrl or Cmd held.
    fn command_key(&mut self, code: KeyCode, mods: Modifiers) -> bool {
        let shift = mods.shift();
        match code {
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'a' => self.select_all(),
                'c' => {
                    self.copy();
                }
                'x' => {
                    self.cut();
                }
                'v' => {
                    self.paste();
                }
                _ => return false,
            },
            KeyCode::Left => self.navigate(shift, CaretModel::move_to_line_start),
            KeyCode::Right => self.navigate(shift, CaretModel::move_to_line_end),
            KeyCode::Up => self.navigate(shift, |c, _| c.move_to_text_start()),
            KeyCode::Down => self.navigate(shift, CaretModel::move_to_text_end),
            _ => return false,
        }
        true
    }

    /// Keys without Ctrl or Cmd.
    fn plain_key(&mut self, code: KeyCode, mods: Modifiers) -> bool {
        let shift = mods.shift();
        match code {
            KeyCode::Left if mods.alt() => self.navigate(shift, CaretModel::move_to_previous_word),
            KeyCode::Right if mods.alt() => self.navigate(shift, CaretModel::move_to_next_word),
            KeyCode::Left => self.navigate(shift, |c, _| c.move_left()),
            KeyCode::Right => self.navigate(shift, CaretModel::move_right),
            KeyCode::Up => self.navigate(shift, CaretModel::move_up_preserve_column),
            KeyCode::Down => self.navigate(shift, CaretModel::move_down_preserve_column),
            KeyCode::Home => self.navigate(shift, |c, _| c.move_to_text_start()),
            KeyCode::End => self.navigate(shift, CaretModel::move_to_text_end),
            KeyCode::PageUp => {
                let lines = self.page_lines();
                self.navigate(shift, |c, buf| {
                    for _ in 0..lines {
                        c.move_up_preserve_column(buf);
                    }
                });
            }
            KeyCode::PageDown => {
                let lines = self.page_lines();
                self.navigate(shift, |c, buf| {
                    for _ in 0..lines {
                        c.move_down_preserve_column(buf);
                    }
                });
            }
            KeyCode::Enter => self.insert_text("\n"),
            KeyCode::Tab => self.insert_text("\t"),
            KeyCode::Escape => {
                self.selection.clear();
                self.repaint = true;
            }
            KeyCode::Char(c) if !c.is_control() => {
                let mut utf8 = [0; 4];
                self.insert_text(c.encode_utf8(&mut utf8));
            }
            _ => return false,
        }
        true
    }

    /// Lines per PageUp/PageDown.
    fn page_lines(&self) -> usize {
        let lh = self.metrics.line_height().max(1);
        let usable = self.layout.text.height - 2 * self.renderer.padding;
        usize::try_from(usable / lh).unwrap_or(0).max(1)
    }

    /// Move the caret, extending the selection with Shift or dropping it
    /// without.
    fn navigate(&mut self, extend: bool, motion: impl FnOnce(&mut CaretModel, &TextBuffer)) {
        if extend && !self.selection.has_selection() {
            self.selection
                .start_selection(self.caret.position(), &self.buffer);
        }
        motion(&mut self.caret, &self.buffer);
        if extend {
            self.selection
                .update_selection(self.caret.position(), &self.buffer);
        } else {
            self.selection.clear();
        }
        self.repaint = true;
    }

    /// Solid caret, caret in view, repaint.
    fn after_input(&mut self, now: Instant) {
        if self.focused {
            self.blink.restart(now);
        }
        self.ensure_caret_visible();
        self.repaint = true;
    }

    // -- Pointer ------------------------------------------------------------

    /// Handle a button press. Returns whether it landed on the widget.
    pub fn pointer_down(&mut self, event: PointerEvent, now: Instant) -> bool {
        if event.kind != PointerEventKind::Press(PointerButton::Left) {
            return false;
        }
        let layout = self.relayout();
        let point = Point::new(event.x, event.y);
        if !Rect::from_size(self.size).contains(point) {
            return false;
        }
        if !self.focused {
            self.focus_gained(now);
        }

        if self.press_scroll_bar(&layout, point) {
            self.repaint = true;
            return true;
        }

        let pos = self.offset_at(&layout, event.x, event.y);
        self.press_clicks = self.clicks.press(now);
        match self.press_clicks {
            1 if event.modifiers.shift() && self.selection.has_selection() => {
                self.selection.update_selection(pos, &self.buffer);
                self.caret.move_to(pos, &self.buffer);
            }
            1 => {
                self.caret.move_to(pos, &self.buffer);
                self.selection.start_selection(pos, &self.buffer);
            }
            2 => {
                let (_, end) = self.selection.select_word(pos, &self.buffer);
                self.caret.move_to(end, &self.buffer);
            }
            _ => {
                let line = self.buffer.find_line_at(pos);
                let (start, end) = (line.start, line.end);
                self.selection.select_line(start, end, &self.buffer);
                self.caret.move_to(end, &self.buffer);
            }
        }
        self.mouse_selecting = true;
        self.after_input(now);
        true
    }

    /// Start a thumb drag or jump the track. Returns whether a bar was hit.
    fn press_scroll_bar(&mut self, layout: &Layout, point: Point) -> bool {
        for orientation in ORIENTATIONS {
            let Some(track) = layout.bar(orientation) else {
                continue;
            };
            let metrics = self.bar_metrics(orientation, layout);
            match self.scroll_bar.hit_test(orientation, track, &metrics, point) {
                Some(ScrollBarHit::Thumb) => {
                    self.scroll
                        .axis_mut(orientation)
                        .start_drag(along(orientation, point));
                }
                Some(ScrollBarHit::Track) => {
                    let click = along(orientation, point) - track_start(orientation, track);
                    let axis = self.scroll.axis_mut(orientation);
                    let target = self.scroll_bar.scroll_from_click(
                        click,
                        &metrics,
                        layout.viewport_extent(orientation),
                        axis.max(),
                    );
                    axis.scroll_to(target);
                }
                None => continue,
            }
            return true;
        }
        false
    }

    /// Handle pointer motion, with or without a button held.
    pub fn pointer_move(&mut self, event: PointerEvent, now: Instant) {
        let layout = self.layout;
        let point = Point::new(event.x, event.y);

        if let Some(orientation) = self.scroll.dragging() {
            let changed = self.scroll.axis_mut(orientation).update_drag(
                along(orientation, point),
                layout.viewport_extent(orientation),
                layout.content_extent(orientation),
            );
            self.repaint |= changed;
            return;
        }

        if self.mouse_selecting && matches!(event.kind, PointerEventKind::Drag(_)) {
            let pos = self.offset_at(&layout, event.x, event.y);
            self.selection.update_selection(pos, &self.buffer);
            self.caret.move_to(pos, &self.buffer);
            self.after_input(now);
            return;
        }

        self.update_hover(&layout, point);
    }

    fn update_hover(&mut self, layout: &Layout, point: Point) {
        for orientation in ORIENTATIONS {
            let over = layout.bar(orientation).is_some_and(|track| {
                self.bar_metrics(orientation, layout).visible && track.contains(point)
            });
            if self.scroll.axis_mut(orientation).set_hovered(over) {
                self.repaint = true;
            }
        }
    }

    /// Handle a button release.
    pub fn pointer_up(&mut self, event: PointerEvent) {
        if self.scroll.dragging().is_some() {
            self.scroll.stop_dragging();
            self.repaint = true;
            return;
        }
        self.mouse_selecting = false;
        let collapsed = self
            .selection
            .bounds(&self.buffer)
            .is_some_and(|(start, end)| start == end);
        if self.press_clicks == 1 && collapsed && !event.modifiers.shift() {
            self.selection.clear();
        }
        self.repaint = true;
    }

    /// The pointer left the widget.
    pub fn pointer_leave(&mut self) {
        if self.scroll.clear_hover() {
            self.repaint = true;
        }
    }

    /// Scroll by wheel `(dx, dy)` in lines.
    // Wheel deltas and line heights are small.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn wheel(&mut self, dx: f32, dy: f32) {
        self.relayout();
        let lh = self.metrics.line_height() as f32;
        let changed_y = self.scroll.vertical.scroll_by((dy * lh).round() as i32);
        let changed_x = self.scroll.horizontal.scroll_by((dx * lh).round() as i32);
        if changed_x || changed_y {
            self.repaint = true;
        }
    }

    // -- Focus and time -----------------------------------------------------

    pub fn focus_gained(&mut self, now: Instant) {
        self.focused = true;
        self.blink.restart(now);
        self.repaint = true;
    }

    /// Hide the caret and drop any held key or drag.
    pub fn focus_lost(&mut self) {
        self.focused = false;
        self.blink.stop();
        self.repeat = None;
        self.mouse_selecting = false;
        self.scroll.stop_dragging();
        self.repaint = true;
    }

    /// Advance timers to `now`. Returns whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.blink.tick(now);
        let due = self.repeat.as_mut().and_then(|r| r.poll(now).then_some(r.key().command));
        if let Some(command) = due {
            self.run_repeat(command);
            self.blink.restart(now);
            self.ensure_caret_visible();
            changed = true;
        }
        self.repaint |= changed;
        changed
    }

    /// Dispatch any input event. Returns whether the widget used it.
    pub fn handle_event(&mut self, event: Event, now: Instant) -> bool {
        match event {
            Event::Key(key) => self.key_down(key, now),
            Event::Paste(text) => {
                self.insert_text(&text);
                self.after_input(now);
                true
            }
            Event::FocusGained => {
                self.focus_gained(now);
                true
            }
            Event::FocusLost => {
                self.focus_lost();
                true
            }
            Event::Pointer(pointer) => match pointer.kind {
                PointerEventKind::Press(_) => self.pointer_down(pointer, now),
                PointerEventKind::Release(_) => {
                    self.pointer_up(pointer);
                    true
                }
                PointerEventKind::Drag(_) | PointerEventKind::Move => {
                    self.pointer_move(pointer, now);
                    true
                }
                PointerEventKind::Leave => {
                    self.pointer_leave();
                    true
                }
                PointerEventKind::Scroll { dx, dy } => {
                    self.wheel(dx, dy);
                    true
                }
            },
        }
    }

    // -- Painting -----------------------------------------------------------

    /// Paint the whole widget at the surface origin.
    pub fn paint(&mut self, surface: &mut dyn Surface) {
        let layout = self.relayout();
        let colors = self.theme.colors;
        surface.fill_rect(Rect::from_size(self.size), colors.background);

        let lh = self.metrics.line_height();
        let scroll_y = self.scroll.scroll_y();
        let visible = self
            .renderer
            .visible_lines(scroll_y, layout.text.height, lh);
        self.gutter.paint(
            surface,
            layout.gutter,
            self.buffer.line_count(),
            visible,
            scroll_y,
            self.renderer.padding,
            self.metrics.as_ref(),
        );

        let frame = TextFrame {
            buffer: &self.buffer,
            caret: &self.caret,
            selection: &self.selection,
            theme: &self.theme,
            metrics: self.metrics.as_ref(),
            viewport: layout.text,
            scroll_x: self.scroll.scroll_x(),
            scroll_y,
            caret_visible: self.focused && self.blink.is_visible(),
        };
        let highlighter = self
            .highlighter
            .as_mut()
            .map(|h| h.as_mut() as &mut dyn SyntaxHighlighter);
        self.renderer.paint(surface, &frame, highlighter);

        for orientation in ORIENTATIONS {
            let Some(track) = layout.bar(orientation) else {
                continue;
            };
            let metrics = self.bar_metrics(orientation, &layout);
            let axis = self.scroll.axis(orientation);
            self.scroll_bar.paint(
                surface,
                orientation,
                track,
                &metrics,
                axis.is_hovered(),
                axis.is_dragging(),
            );
        }
        if let (Some(v), Some(h)) = (layout.vertical_bar, layout.horizontal_bar) {
            let corner = Rect::new(v.x, h.y, v.width, h.height);
            surface.fill_rect(corner, colors.scroll_bar_background);
        }
        self.repaint = false;
    }
}

impl fmt::Debug for TextArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextArea")
            .field("len", &self.buffer.len())
            .field("caret", &self.caret)
            .field("selection", &self.selection)
            .field("scroll", &self.scroll)
            .field("size", &self.size)
            .field("focused", &self.focused)
            .field("text_version", &self.text_version)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use pretty_assertions::assert_eq;
    use scribe_paint::metrics::MonospaceMetrics;
    use scribe_paint::surface::DisplayList;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    const NONE: Modifiers = Modifiers::empty();
    const SHIFT: Modifiers = Modifiers::SHIFT;
    const CTRL: Modifiers = Modifiers::CTRL;

    fn options() -> TextAreaOptions {
        TextAreaOptions {
            line_numbers: false,
            ..TextAreaOptions::default()
        }
    }

    /// 200×100 widget, 10×20 cells, no gutter.
    fn area(text: &str) -> (TextArea, Instant) {
        let mut ta = TextArea::from_options(
            &options(),
            Box::new(MonospaceMetrics::new(10, 20, 15)),
            Box::new(MemoryClipboard::new()),
        )
        .unwrap();
        ta.set_size(Size::new(200, 100));
        ta.set_text(text);
        let now = Instant::now();
        ta.focus_gained(now);
        (ta, now)
    }

    fn press(ta: &mut TextArea, code: KeyCode, mods: Modifiers, now: Instant) -> bool {
        ta.key_down(KeyEvent::new(code, mods), now)
    }

    fn tap(ta: &mut TextArea, code: KeyCode, mods: Modifiers, now: Instant) {
        press(ta, code, mods, now);
        ta.key_up(code);
    }

    fn type_str(ta: &mut TextArea, text: &str, now: Instant) {
        for ch in text.chars() {
            tap(ta, KeyCode::Char(ch), NONE, now);
        }
    }

    fn click(ta: &mut TextArea, x: i32, y: i32, now: Instant) {
        let down = PointerEvent::new(PointerEventKind::Press(PointerButton::Left), x, y);
        ta.pointer_down(down, now);
        let up = PointerEvent::new(PointerEventKind::Release(PointerButton::Left), x, y);
        ta.pointer_up(up);
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // -- Typing and deleting ------------------------------------------------

    #[test]
    fn typing_inserts_at_caret() {
        let (mut ta, now) = area("");
        type_str(&mut ta, "abc", now);
        assert_eq!(ta.text(), "abc");
        assert_eq!(ta.caret().position(), 3);
        assert_eq!(ta.history().undo_count(), 3);
    }

    #[test]
    fn enter_and_tab_insert_characters() {
        let (mut ta, now) = area("ab");
        tap(&mut ta, KeyCode::Enter, NONE, now);
        tap(&mut ta, KeyCode::Tab, NONE, now);
        assert_eq!(ta.text(), "ab\n\t");
        assert_eq!(ta.buffer().line_count(), 2);
    }

    #[test]
    fn select_all_then_delete_then_undo() {
        let (mut ta, now) = area("");
        type_str(&mut ta, "abc", now);
        tap(&mut ta, KeyCode::Char('a'), CTRL, now);
        assert_eq!(ta.selection().bounds(ta.buffer()), Some((0, 3)));

        tap(&mut ta, KeyCode::Delete, NONE, now);
        assert_eq!(ta.text(), "");
        assert_eq!(
            ta.history().last_undo(),
            Some(&TextAction::Delete {
                position: 0,
                text: "abc".to_string(),
                caret_before: 3,
            })
        );

        assert!(ta.undo());
        assert_eq!(ta.text(), "abc");
        assert_eq!(ta.caret().position(), 3);
    }

    #[test]
    fn backspace_and_delete_single_chars() {
        let (mut ta, now) = area("abcd");
        tap(&mut ta, KeyCode::Left, NONE, now);
        tap(&mut ta, KeyCode::Backspace, NONE, now);
        assert_eq!(ta.text(), "abd");
        assert_eq!(ta.caret().position(), 2);
        tap(&mut ta, KeyCode::Delete, NONE, now);
        assert_eq!(ta.text(), "ab");
        assert_eq!(ta.caret().position(), 2);
    }

    #[test]
    fn delete_at_boundaries_is_noop() {
        let (mut ta, now) = area("ab");
        assert!(!ta.delete_forward());
        tap(&mut ta, KeyCode::Home, NONE, now);
        assert!(!ta.delete_backward());
        assert_eq!(ta.text(), "ab");
        assert_eq!(ta.history().undo_count(), 0);
    }

    #[test]
    fn typing_replaces_selection() {
        let (mut ta, now) = area("hello");
        tap(&mut ta, KeyCode::Left, SHIFT, now);
        tap(&mut ta, KeyCode::Left, SHIFT, now);
        type_str(&mut ta, "p!", now);
        assert_eq!(ta.text(), "help!");
        assert!(!ta.selection().has_selection());
    }

    // -- Clipboard ----------------------------------------------------------

    #[test]
    fn paste_over_selection_is_two_undo_steps() {
        let (mut ta, now) = area("abcd");
        ta.clipboard().set_text("XY");
        ta.caret.move_to(1, &ta.buffer);
        tap(&mut ta, KeyCode::Right, SHIFT, now);
        tap(&mut ta, KeyCode::Right, SHIFT, now);
        assert_eq!(ta.selected_text().as_deref(), Some("bc"));

        tap(&mut ta, KeyCode::Char('v'), CTRL, now);
        assert_eq!(ta.text(), "aXYd");
        assert_eq!(ta.caret().position(), 3);
        let actions = ta.history().undo_actions();
        assert_eq!(actions.len(), 2);
        assert!(matches!(&actions[0], TextAction::Delete { position: 1, text, .. } if text == "bc"));
        assert!(matches!(&actions[1], TextAction::Insert { position: 1, text, .. } if text == "XY"));

        ta.undo();
        assert_eq!(ta.text(), "ad");
        ta.undo();
        assert_eq!(ta.text(), "abcd");
        assert_eq!(ta.caret().position(), 3);
    }

    #[test]
    fn copy_and_cut() {
        let (mut ta, now) = area("one two");
        tap(&mut ta, KeyCode::Left, Modifiers::ALT | SHIFT, now);
        tap(&mut ta, KeyCode::Char('c'), CTRL, now);
        assert_eq!(ta.clipboard().get_text().as_deref(), Some("two"));
        assert_eq!(ta.text(), "one two");

        tap(&mut ta, KeyCode::Char('x'), CTRL, now);
        assert_eq!(ta.text(), "one ");
        assert_eq!(ta.clipboard().get_text().as_deref(), Some("two"));
    }

    #[test]
    fn copy_without_selection_leaves_clipboard() {
        let (mut ta, now) = area("abc");
        ta.clipboard().set_text("keep");
        tap(&mut ta, KeyCode::Char('c'), CTRL, now);
        tap(&mut ta, KeyCode::Char('x'), CTRL, now);
        assert_eq!(ta.clipboard().get_text().as_deref(), Some("keep"));
        assert_eq!(ta.text(), "abc");
    }

    #[test]
    fn paste_of_empty_clipboard_does_nothing() {
        let (mut ta, _) = area("abc");
        assert!(!ta.paste());
        assert_eq!(ta.history().undo_count(), 0);
    }

    #[test]
    fn paste_event_inserts_once() {
        let (mut ta, now) = area("");
        ta.handle_event(Event::Paste("line1\nline2".to_string()), now);
        assert_eq!(ta.text(), "line1\nline2");
        assert_eq!(ta.history().undo_count(), 1);
    }

    // -- Undo and redo keys -------------------------------------------------

    #[test]
    fn undo_redo_shortcuts() {
        let (mut ta, now) = area("");
        type_str(&mut ta, "ab", now);
        tap(&mut ta, KeyCode::Char('z'), CTRL, now);
        assert_eq!(ta.text(), "a");
        tap(&mut ta, KeyCode::Char('Z'), CTRL | SHIFT, now);
        assert_eq!(ta.text(), "ab");
        tap(&mut ta, KeyCode::Char('z'), CTRL, now);
        tap(&mut ta, KeyCode::Char('y'), CTRL, now);
        assert_eq!(ta.text(), "ab");
    }

    // -- Key repeat ---------------------------------------------------------

    #[test]
    fn held_backspace_repeats_until_release() {
        let (mut ta, t0) = area("abcdef");
        press(&mut ta, KeyCode::Backspace, NONE, t0);
        assert_eq!(ta.text(), "abcde");

        assert!(!ta.tick(t0 + ms(100)));
        assert_eq!(ta.text(), "abcde");
        ta.tick(t0 + ms(250));
        assert_eq!(ta.text(), "abcd");

        ta.key_up(KeyCode::Backspace);
        ta.tick(t0 + ms(10_000));
        assert_eq!(ta.text(), "abcd");
    }

    #[test]
    fn platform_repeat_events_are_ignored() {
        let (mut ta, t0) = area("abc");
        press(&mut ta, KeyCode::Backspace, NONE, t0);
        let repeat = KeyEvent {
            kind: KeyEventKind::Repeat,
            ..KeyEvent::new(KeyCode::Backspace, NONE)
        };
        ta.key_down(repeat, t0 + ms(30));
        assert_eq!(ta.text(), "ab");
    }

    #[test]
    fn focus_loss_stops_repeat() {
        let (mut ta, t0) = area("abc");
        press(&mut ta, KeyCode::Backspace, NONE, t0);
        ta.focus_lost();
        ta.tick(t0 + ms(1000));
        assert_eq!(ta.text(), "ab");
    }

    #[test]
    fn next_deadline_covers_repeat() {
        let (mut ta, t0) = area("abc");
        assert_eq!(ta.next_deadline(), Some(t0 + ms(500)));
        press(&mut ta, KeyCode::Backspace, NONE, t0);
        assert_eq!(ta.next_deadline(), Some(t0 + ms(250)));
    }

    // -- Navigation ---------------------------------------------------------

    #[test]
    fn word_moves_with_alt() {
        let (mut ta, now) = area("foo  bar");
        tap(&mut ta, KeyCode::Left, Modifiers::ALT, now);
        assert_eq!(ta.caret().position(), 5);
        tap(&mut ta, KeyCode::Left, Modifiers::ALT, now);
        assert_eq!(ta.caret().position(), 0);
    }

    #[test]
    fn line_and_document_jumps() {
        let (mut ta, now) = area("ab\ncd\nef");
        tap(&mut ta, KeyCode::Up, NONE, now);
        tap(&mut ta, KeyCode::Left, CTRL, now);
        assert_eq!(ta.caret().position(), 3);
        tap(&mut ta, KeyCode::Right, CTRL, now);
        assert_eq!(ta.caret().position(), 5);
        tap(&mut ta, KeyCode::Up, CTRL, now);
        assert_eq!(ta.caret().position(), 0);
        tap(&mut ta, KeyCode::End, NONE, now);
        assert_eq!(ta.caret().position(), 8);
        tap(&mut ta, KeyCode::Home, NONE, now);
        assert_eq!(ta.caret().position(), 0);
        tap(&mut ta, KeyCode::Down, CTRL, now);
        assert_eq!(ta.caret().position(), 8);
    }

    #[test]
    fn shift_extends_and_plain_move_clears() {
        let (mut ta, now) = area("abc\ndef");
        tap(&mut ta, KeyCode::Up, SHIFT, now);
        assert_eq!(ta.selected_text().as_deref(), Some("\ndef"));
        tap(&mut ta, KeyCode::Right, NONE, now);
        assert!(!ta.selection().has_selection());
    }

    #[test]
    fn escape_clears_selection() {
        let (mut ta, now) = area("abc");
        tap(&mut ta, KeyCode::Char('a'), CTRL, now);
        tap(&mut ta, KeyCode::Escape, NONE, now);
        assert!(!ta.selection().has_selection());
    }

    #[test]
    fn page_down_moves_by_viewport() {
        let text: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        let (mut ta, now) = area(&text.join("\n"));
        tap(&mut ta, KeyCode::Home, NONE, now);
        // (100 - 2·5) / 20 = 4 lines.
        tap(&mut ta, KeyCode::PageDown, NONE, now);
        assert_eq!(ta.caret().line_index(ta.buffer()), 4);
        tap(&mut ta, KeyCode::PageUp, NONE, now);
        assert_eq!(ta.caret().line_index(ta.buffer()), 0);
    }

    #[test]
    fn unknown_command_keys_are_not_handled() {
        let (mut ta, now) = area("abc");
        assert!(!press(&mut ta, KeyCode::Char('q'), CTRL, now));
        assert_eq!(ta.text(), "abc");
    }

    // -- Scrolling ----------------------------------------------------------

    fn fifty_lines() -> String {
        vec!["x"; 50].join("\n")
    }

    #[test]
    fn caret_at_end_scrolls_into_view() {
        let (ta, _) = area(&fifty_lines());
        // 50 · 20 + 10 - 100.
        assert_eq!(ta.scroll().scroll_y(), 910);
        assert_eq!(ta.scroll().vertical.max(), 910);
    }

    #[test]
    fn moving_up_scrolls_back() {
        let (mut ta, now) = area(&fifty_lines());
        tap(&mut ta, KeyCode::Home, NONE, now);
        assert_eq!(ta.scroll().scroll_y(), 0);
    }

    #[test]
    fn long_line_scrolls_horizontally() {
        let (ta, _) = area(&"a".repeat(40));
        // Caret x 400, plus caret width and padding, minus the viewport.
        assert!(ta.layout().horizontal_bar.is_some());
        assert_eq!(ta.scroll().scroll_x(), 400 + 2 + 10 - 200);
    }

    #[test]
    fn wheel_scrolls_by_lines() {
        let (mut ta, now) = area(&fifty_lines());
        tap(&mut ta, KeyCode::Home, NONE, now);
        ta.wheel(0.0, 3.0);
        assert_eq!(ta.scroll().scroll_y(), 60);
        ta.wheel(0.0, -10.0);
        assert_eq!(ta.scroll().scroll_y(), 0);
    }

    #[test]
    fn layout_reserves_bars_and_gutter() {
        let (mut ta, _) = area(&fifty_lines());
        ta.set_line_numbers_visible(true);
        let layout = ta.layout();
        // Two digits · 10 + 2 · 5.
        assert_eq!(layout.gutter.width, 30);
        assert_eq!(layout.text, Rect::new(30, 0, 155, 100));
        assert_eq!(layout.vertical_bar, Some(Rect::new(185, 0, 15, 100)));
        assert_eq!(layout.horizontal_bar, None);
    }

    #[test]
    fn track_click_jumps() {
        let (mut ta, now) = area(&fifty_lines());
        tap(&mut ta, KeyCode::Home, NONE, now);
        click(&mut ta, 190, 90, now);
        assert!(ta.scroll().scroll_y() > 800);
        assert_eq!(ta.caret().position(), 0);
    }

    #[test]
    fn thumb_drag_scales_by_content_ratio() {
        let (mut ta, now) = area(&fifty_lines());
        tap(&mut ta, KeyCode::Home, NONE, now);
        let down = PointerEvent::new(PointerEventKind::Press(PointerButton::Left), 190, 5);
        ta.pointer_down(down, now);
        assert_eq!(ta.scroll().dragging(), Some(Orientation::Vertical));

        let drag = PointerEvent::new(PointerEventKind::Drag(PointerButton::Left), 190, 25);
        ta.pointer_move(drag, now);
        // 20 px of pointer / (100 / 1010).
        assert_eq!(ta.scroll().scroll_y(), 202);

        let up = PointerEvent::new(PointerEventKind::Release(PointerButton::Left), 190, 25);
        ta.pointer_up(up);
        assert_eq!(ta.scroll().dragging(), None);
    }

    #[test]
    fn hovering_a_bar_is_tracked() {
        let (mut ta, now) = area(&fifty_lines());
        ta.take_repaint_request();
        let over = PointerEvent::new(PointerEventKind::Move, 190, 50);
        ta.pointer_move(over, now);
        assert!(ta.scroll().vertical.is_hovered());
        assert!(ta.take_repaint_request());

        ta.pointer_leave();
        assert!(!ta.scroll().vertical.is_hovered());
    }

    // -- Mouse selection ----------------------------------------------------

    #[test]
    fn single_click_places_caret_without_selection() {
        let (mut ta, now) = area("hello world\nfoo");
        click(&mut ta, 37, 15, now);
        assert_eq!(ta.caret().position(), 3);
        assert!(!ta.selection().has_selection());
    }

    #[test]
    fn double_and_triple_click() {
        let (mut ta, t0) = area("hello world\nfoo");
        click(&mut ta, 37, 15, t0);
        click(&mut ta, 37, 15, t0 + ms(100));
        assert_eq!(ta.selected_text().as_deref(), Some("hello"));
        assert_eq!(ta.caret().position(), 5);

        click(&mut ta, 37, 15, t0 + ms(200));
        assert_eq!(ta.selected_text().as_deref(), Some("hello world"));
        assert_eq!(ta.caret().position(), 11);
    }

    #[test]
    fn drag_selects() {
        let (mut ta, now) = area("hello world");
        let down = PointerEvent::new(PointerEventKind::Press(PointerButton::Left), 5, 15);
        ta.pointer_down(down, now);
        let drag = PointerEvent::new(PointerEventKind::Drag(PointerButton::Left), 55, 15);
        ta.pointer_move(drag, now);
        let up = PointerEvent::new(PointerEventKind::Release(PointerButton::Left), 55, 15);
        ta.pointer_up(up);
        assert_eq!(ta.selected_text().as_deref(), Some("hello"));
        assert_eq!(ta.caret().position(), 5);
    }

    #[test]
    fn shift_click_extends() {
        let (mut ta, now) = area("hello world");
        tap(&mut ta, KeyCode::Home, NONE, now);
        tap(&mut ta, KeyCode::Right, SHIFT, now);
        let down = PointerEvent::new(PointerEventKind::Press(PointerButton::Left), 55, 15)
            .with_modifiers(SHIFT);
        ta.pointer_down(down, now);
        ta.pointer_up(down);
        assert_eq!(ta.selected_text().as_deref(), Some("hello"));
    }

    // -- Document -----------------------------------------------------------

    #[test]
    fn set_text_resets_history_and_caret() {
        let (mut ta, now) = area("");
        type_str(&mut ta, "abc", now);
        ta.set_text("new\ntext");
        assert!(!ta.history().can_undo());
        assert_eq!(ta.caret().position(), 8);
        assert!(!ta.undo());
    }

    #[test]
    fn callback_fires_once_per_edit() {
        let (mut ta, now) = area("");
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        ta.set_on_text_changed(move || seen.set(seen.get() + 1));

        type_str(&mut ta, "ab", now);
        assert_eq!(count.get(), 2);
        ta.paste();
        assert_eq!(count.get(), 2);
        ta.undo();
        assert_eq!(count.get(), 3);
        tap(&mut ta, KeyCode::Left, NONE, now);
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn load_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "first\nsecond").unwrap();

        let (mut ta, now) = area("scratch");
        ta.load_from_file(&path).unwrap();
        assert_eq!(ta.text(), "first\nsecond");
        assert_eq!(ta.caret().position(), 0);
        assert!(!ta.history().can_undo());

        type_str(&mut ta, ">", now);
        assert!(ta.is_modified());
        ta.save_to_file(&path).unwrap();
        assert!(!ta.is_modified());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), ">first\nsecond");
    }

    #[test]
    fn go_to_line_clamps() {
        let (mut ta, _) = area("a\nb\nc");
        ta.go_to_line(1);
        assert_eq!(ta.caret().position(), 2);
        ta.go_to_line(99);
        assert_eq!(ta.caret().position(), 4);
    }

    // -- Blink and paint ----------------------------------------------------

    #[test]
    fn blink_toggles_caret_and_input_restarts_it() {
        let (mut ta, t0) = area("abc");
        assert!(ta.caret_visible());
        assert!(ta.tick(t0 + ms(500)));
        assert!(!ta.caret_visible());

        tap(&mut ta, KeyCode::Left, NONE, t0 + ms(600));
        assert!(ta.caret_visible());
        assert!(!ta.tick(t0 + ms(1000)));
    }

    #[test]
    fn unfocused_caret_is_hidden() {
        let (mut ta, _) = area("abc");
        ta.focus_lost();
        assert!(!ta.caret_visible());
    }

    #[test]
    fn paint_layers_background_text_caret() {
        let (mut ta, _) = area("abc");
        let mut dl = DisplayList::new();
        ta.paint(&mut dl);

        let colors = ta.theme().colors;
        assert_eq!(dl.fills().next(), Some((Rect::new(0, 0, 200, 100), colors.background)));
        assert_eq!(
            dl.texts().map(|(t, _, _)| t).collect::<Vec<_>>(),
            vec!["abc"]
        );
        assert_eq!(dl.fills().last().map(|(_, c)| c), Some(colors.caret));
        assert!(!ta.take_repaint_request());
    }

    #[test]
    fn paint_includes_gutter_and_scroll_bar() {
        let (mut ta, _) = area(&fifty_lines());
        ta.set_line_numbers_visible(true);
        let mut dl = DisplayList::new();
        ta.paint(&mut dl);

        let colors = ta.theme().colors;
        assert!(dl.fills_with(colors.line_numbers_background).next().is_some());
        assert!(dl.fills_with(colors.scroll_bar_background).next().is_some());
        assert!(dl.texts().any(|(t, _, c)| t == "50" && c == colors.line_numbers_text));
    }
}
