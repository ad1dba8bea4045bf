use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::InputState;
use crate::theme;
use crate::view::PromptState;

pub const PROMPT: &str = "jq> ";
pub const PAUSED_PROMPT_A: &str = "||";
pub const PAUSED_PROMPT_B: &str = "> ";

/// Caption spans for the prompt state
pub fn caption(state: PromptState) -> Vec<Span<'static>> {
    let tail_style = if state.erroring {
        theme::prompt::ERROR
    } else {
        theme::prompt::OK
    };

    if state.paused {
        vec![
            Span::styled(PAUSED_PROMPT_A, theme::prompt::PAUSED),
            Span::styled(PAUSED_PROMPT_B, tail_style),
        ]
    } else {
        vec![Span::styled(PROMPT, tail_style)]
    }
}

pub fn render_prompt(input: &InputState, state: PromptState, frame: &mut Frame, area: Rect) {
    let spans = caption(state);
    let caption_width: usize = spans.iter().map(|span| span.width()).sum();

    let [caption_area, text_area] =
        Layout::horizontal([Constraint::Length(caption_width as u16), Constraint::Min(1)])
            .areas(area);

    frame.render_widget(Paragraph::new(Line::from(spans)), caption_area);
    frame.render_widget(&input.textarea, text_area);
}

#[cfg(test)]
#[path = "input_render_tests.rs"]
mod input_render_tests;
