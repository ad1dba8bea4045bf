//! Pausable, scrollable view over evaluator output
//!
//! The body shows the live generation's output when it has any and the view is not
//! paused, and the committed output otherwise. The scroll offset is reclamped every
//! time the displayed text or the height changes.

use std::borrow::Cow;

use crate::scroll::ScrollState;

/// Height used before the terminal has reported its size
pub const DEFAULT_FALLBACK_HEIGHT: u16 = 256;

pub const HELP_TEXT: &str = "HELP: ^C: Exit, ^P: Pause, jq manual: https://jqlang.org/manual";

/// jq appends this hint to nearly every compile error
const NOISY_HINT: &str = " (Unix shell quoting issues?)";

/// Content of the bottom bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorBar {
    Help,
    Empty,
    Error(String),
    Warning(String),
}

impl ErrorBar {
    pub fn text(&self) -> &str {
        match self {
            ErrorBar::Help => HELP_TEXT,
            ErrorBar::Empty => "",
            ErrorBar::Error(text) | ErrorBar::Warning(text) => text,
        }
    }
}

/// Prompt decoration: ok or erroring, optionally combined with paused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PromptState {
    pub paused: bool,
    pub erroring: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCommand {
    Up,
    Down,
    PageUp,
    PageDown,
}

#[derive(Debug)]
pub struct ViewState {
    /// Last output kept on screen while the live generation has nothing to show
    pub committed: Vec<u8>,
    pub scroll: ScrollState,
    pub paused: bool,
    pub erroring: bool,
    pub error_bar: ErrorBar,
    height: Option<u16>,
    fallback_height: u16,
    body: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_HEIGHT)
    }
}

impl ViewState {
    pub fn new(fallback_height: u16) -> Self {
        Self {
            committed: Vec::new(),
            scroll: ScrollState::new(),
            paused: false,
            erroring: false,
            error_bar: ErrorBar::Help,
            height: None,
            fallback_height,
            body: String::new(),
        }
    }

    /// Text currently painted in the body
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn prompt(&self) -> PromptState {
        PromptState {
            paused: self.paused,
            erroring: self.erroring,
        }
    }

    pub fn height(&self) -> Option<u16> {
        self.height
    }

    pub fn visible_height(&self) -> usize {
        self.height.unwrap_or(self.fallback_height) as usize
    }

    /// Text the body is drawn from given the live generation's output
    pub fn display_source<'a>(&'a self, live: &'a [u8]) -> &'a [u8] {
        if !live.is_empty() && !self.paused {
            live
        } else {
            &self.committed
        }
    }

    /// Reclamp the scroll offset and repaint the body window
    pub fn refresh(&mut self, live: &[u8]) {
        self.reclamp(live);
        self.repaint(live);
    }

    /// Repaint the body window at the current offset without reclamping
    ///
    /// Used while output is still streaming in: the offset may point past the
    /// lines received so far and is only clamped once the output is complete.
    pub fn repaint(&mut self, live: &[u8]) {
        let source = self.display_source(live);
        self.body = window(source, self.scroll.offset, self.visible_height());
    }

    pub fn reclamp(&mut self, live: &[u8]) {
        let lines = line_count(self.display_source(live));
        let height = self.visible_height();
        self.scroll.update_bounds(lines, height);
    }

    pub fn resize(&mut self, height: u16, live: &[u8]) {
        self.height = Some(height);
        self.refresh(live);
    }

    pub fn scroll(&mut self, command: ScrollCommand, live: &[u8]) {
        self.reclamp(live);
        match command {
            ScrollCommand::Up => self.scroll.scroll_up(1),
            ScrollCommand::Down => self.scroll.scroll_down(1),
            ScrollCommand::PageUp => self.scroll.page_up(),
            ScrollCommand::PageDown => self.scroll.page_down(),
        }
        self.refresh(live);
    }

    pub fn commit(&mut self, output: &[u8]) {
        self.committed.clear();
        self.committed.extend_from_slice(output);
    }

    pub fn clear_committed(&mut self) {
        self.committed.clear();
    }

    /// Flip the paused flag, returning the new value
    ///
    /// Non-empty live output is committed on both transitions so resuming shows the
    /// latest output rather than the snapshot taken when pausing.
    pub fn toggle_pause(&mut self, live: &[u8]) -> bool {
        if !live.is_empty() {
            self.commit(live);
        }
        self.paused = !self.paused;
        self.refresh(live);
        self.paused
    }

    pub fn show_error(&mut self, errors: &[u8]) {
        self.error_bar = ErrorBar::Error(clean_error_text(errors));
    }

    pub fn show_warning(&mut self, warning: &str) {
        self.error_bar = ErrorBar::Warning(warning.to_string());
    }

    /// Blank the bar; this also drops a startup config warning on the first respawn
    pub fn clear_error_bar(&mut self) {
        self.error_bar = ErrorBar::Empty;
    }
}

/// Number of lines in `text`, counting a trailing newline as starting an empty line
pub fn line_count(text: &[u8]) -> usize {
    memchr::memchr_iter(b'\n', text).count() + 1
}

/// Up to `height` lines of `text` starting at line `offset`
pub fn window(text: &[u8], offset: usize, height: usize) -> String {
    let text: Cow<'_, str> = String::from_utf8_lossy(text);
    text.split('\n')
        .skip(offset)
        .take(height)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Evaluator stderr as shown in the error bar
pub fn clean_error_text(errors: &[u8]) -> String {
    String::from_utf8_lossy(errors)
        .replace(NOISY_HINT, "")
        .trim()
        .to_string()
}

#[cfg(test)]
#[path = "view_state_tests.rs"]
mod view_state_tests;
