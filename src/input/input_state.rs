use ratatui::crossterm::event::KeyEvent;
use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

use crate::theme;

/// Single-line query prompt
pub struct InputState {
    pub textarea: TextArea<'static>,
}

impl InputState {
    /// Prompt pre-filled with `initial`, caret at the end
    pub fn new(initial: &str) -> Self {
        let mut textarea = TextArea::new(vec![initial.to_string()]);
        textarea.set_cursor_line_style(Style::default());
        textarea.set_cursor_style(theme::prompt::CURSOR);
        textarea.set_style(theme::prompt::QUERY);
        textarea.move_cursor(CursorMove::End);

        Self { textarea }
    }

    pub fn query(&self) -> &str {
        self.textarea.lines()[0].as_ref()
    }

    pub fn caret(&self) -> usize {
        self.textarea.cursor().1
    }

    /// Move the caret to a specific column, clamped to the text length
    pub fn set_caret(&mut self, target_col: usize) {
        let current_col = self.caret();
        let text_length = self.query().chars().count();
        let target_col = target_col.min(text_length);

        match target_col.cmp(&current_col) {
            std::cmp::Ordering::Less => {
                for _ in 0..(current_col - target_col) {
                    self.textarea.move_cursor(CursorMove::Back);
                }
            }
            std::cmp::Ordering::Greater => {
                for _ in 0..(target_col - current_col) {
                    self.textarea.move_cursor(CursorMove::Forward);
                }
            }
            std::cmp::Ordering::Equal => {}
        }
    }

    /// Feed an editing key to the widget, returning whether the text changed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let before = self.query().to_string();
        self.textarea.input(key);
        self.query() != before
    }

    /// Insert pasted text on the single line, returning whether the text changed
    pub fn paste(&mut self, text: &str) -> bool {
        let flattened: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if flattened.is_empty() {
            return false;
        }
        self.textarea.insert_str(flattened)
    }
}

#[cfg(test)]
#[path = "input_state_tests.rs"]
mod input_state_tests;
