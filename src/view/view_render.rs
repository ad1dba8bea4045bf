use ansi_to_tui::IntoText;
use ratatui::{
    Frame,
    layout::Rect,
    text::Text,
    widgets::{Paragraph, Wrap},
};

use super::view_state::{ErrorBar, ViewState};
use crate::theme;

pub fn render_body(view: &ViewState, frame: &mut Frame, area: Rect) {
    let body = view.body();

    // The evaluator may emit ANSI colors when asked to
    let text = body
        .as_bytes()
        .to_vec()
        .into_text()
        .unwrap_or_else(|_| Text::raw(body));

    let paragraph = Paragraph::new(text).style(theme::body::TEXT);
    frame.render_widget(paragraph, area);
}

pub fn render_error_bar(view: &ViewState, frame: &mut Frame, area: Rect) {
    let style = match view.error_bar {
        ErrorBar::Help | ErrorBar::Empty => theme::error_bar::HELP,
        ErrorBar::Error(_) => theme::error_bar::ERROR,
        ErrorBar::Warning(_) => theme::error_bar::WARNING,
    };

    let text = Text::styled(view.error_bar.text().to_string(), style);
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Rows the error bar needs for its current text, capped at `max`
pub fn error_bar_height(view: &ViewState, max: u16) -> u16 {
    let lines = view.error_bar.text().lines().count().max(1);
    (lines as u16).min(max.max(1))
}
