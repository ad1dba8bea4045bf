use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

use super::app_state::{App, live_output};
use crate::event_loop::Handle;
use crate::view::ScrollCommand;
use crate::view::view_render::error_bar_height;

/// Longest wait for stream readiness before checking the terminal again
const STREAM_POLL_TIMEOUT: Duration = Duration::from_millis(20);

/// Stream callbacks run per tick before the terminal gets a turn
const MAX_DISPATCH_PER_TICK: usize = 64;

impl App {
    pub fn handle_events(&mut self) -> io::Result<()> {
        self.poll_interrupt();
        if self.should_quit {
            return Ok(());
        }

        self.run_debounced_respawn();

        let timeout = self
            .debouncer
            .as_ref()
            .and_then(|d| d.remaining())
            .map_or(STREAM_POLL_TIMEOUT, |remaining| {
                remaining.min(STREAM_POLL_TIMEOUT)
            });
        self.pump_streams(timeout);

        while !self.should_quit && event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                Event::Paste(text) => {
                    self.handle_paste_event(&text);
                }
                Event::Resize(_, rows) => {
                    self.handle_resize(rows);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Respawn once the query has settled, if a respawn is pending
    pub fn run_debounced_respawn(&mut self) {
        if !self.debouncer.as_ref().is_some_and(|d| d.should_execute()) {
            return;
        }
        let query = self.query().to_string();
        self.respawn(&query);
        if let Some(debouncer) = self.debouncer.as_mut() {
            debouncer.mark_executed();
        }
    }

    /// Wait up to `timeout` for a watched handle, then run every ready callback
    pub fn pump_streams(&mut self, timeout: Duration) {
        let Some(handle) = self.events.next_ready(timeout) else {
            return;
        };
        self.dispatch(handle);

        for _ in 1..MAX_DISPATCH_PER_TICK {
            match self.events.try_next_ready() {
                Some(handle) => self.dispatch(handle),
                None => break,
            }
        }
    }

    pub fn dispatch(&mut self, handle: Handle) {
        match handle {
            Handle::Source => self.on_source_ready(),
            Handle::Output(id) => self.on_output_ready(id),
            Handle::Error(id) => self.on_error_ready(id),
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if let Some(command) = scroll_command(key.code) {
            self.scroll(command);
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('p') if ctrl => {
                self.toggle_pause();
                return;
            }
            // Single-line prompt
            KeyCode::Enter => return,
            KeyCode::Char('m') | KeyCode::Char('j') if ctrl => return,
            _ => {}
        }

        if self.input.handle_key(key) {
            self.on_query_changed();
        }
        self.mark_dirty();
    }

    fn handle_paste_event(&mut self, text: &str) {
        if self.input.paste(text) {
            self.on_query_changed();
        }
        self.mark_dirty();
    }

    /// Terminal now has `rows` rows; the body gets what the prompt and error bar leave
    pub fn handle_resize(&mut self, rows: u16) {
        let body_rows = rows.saturating_sub(1 + error_bar_height(&self.view, rows / 2));
        self.view.resize(body_rows, live_output(&self.generation));
        self.mark_dirty();
    }

    fn on_query_changed(&mut self) {
        match self.debouncer.as_mut() {
            Some(debouncer) => debouncer.schedule_execution(),
            None => {
                let query = self.query().to_string();
                self.respawn(&query);
            }
        }
    }

    fn scroll(&mut self, command: ScrollCommand) {
        self.view.scroll(command, live_output(&self.generation));
        self.mark_dirty();
    }

    /// Freeze or unfreeze the displayed output
    ///
    /// While paused the source is not read (unless configured otherwise), so
    /// upstream producers see backpressure instead of unbounded buffering.
    pub fn toggle_pause(&mut self) {
        let paused = self.view.toggle_pause(live_output(&self.generation));
        log::debug!("paused: {}", paused);

        if !self.read_while_paused && self.source.is_some() {
            if paused {
                self.events.unwatch(Handle::Source);
            } else {
                self.events.watch(Handle::Source);
            }
        }
        self.mark_dirty();
    }
}

fn scroll_command(code: KeyCode) -> Option<ScrollCommand> {
    match code {
        KeyCode::Up => Some(ScrollCommand::Up),
        KeyCode::Down => Some(ScrollCommand::Down),
        KeyCode::PageUp => Some(ScrollCommand::PageUp),
        KeyCode::PageDown => Some(ScrollCommand::PageDown),
        _ => None,
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
