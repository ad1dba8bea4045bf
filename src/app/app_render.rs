use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use super::app_state::{App, live_output};
use crate::input::input_render::render_prompt;
use crate::view::view_render::{error_bar_height, render_body, render_error_bar};

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let bar_height = error_bar_height(&self.view, area.height / 2);

        let [prompt_area, body_area, bar_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(bar_height),
        ])
        .areas(area);

        // The error bar can grow between resizes
        if self.view.height() != Some(body_area.height) {
            self.view
                .resize(body_area.height, live_output(&self.generation));
        }

        render_prompt(&self.input, self.view.prompt(), frame, prompt_area);
        render_body(&self.view, frame, body_area);
        render_error_bar(&self.view, frame, bar_area);
    }
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
