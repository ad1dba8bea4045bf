use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use crate::config::Config;
use crate::evaluator::{Debouncer, EvaluatorCommand, Generation, InputBuffer};
use crate::event_loop::{EventLoop, Handle};
use crate::input::InputState;
use crate::stream::StreamReader;
use crate::view::ViewState;

/// Source chunks held in memory before the reader stops pulling from upstream
const SOURCE_QUEUE_CAPACITY: usize = 16;

/// Application state
pub struct App {
    pub input: InputState,
    pub view: ViewState,
    /// Live generation, if one is running or has produced the current output
    pub generation: Option<Generation>,
    /// Everything read from the source so far
    pub buffer: InputBuffer,
    pub(super) source: Option<StreamReader>,
    pub events: EventLoop,
    pub(super) evaluator: EvaluatorCommand,
    pub(super) next_generation: u64,
    pub(super) debouncer: Option<Debouncer>,
    pub(super) read_while_paused: bool,
    /// Set by SIGINT or SIGTERM once registered
    pub(super) interrupt: Option<Arc<AtomicBool>>,
    pub should_quit: bool,
    pub needs_render: bool,
}

impl App {
    /// Start reading `source` and spawn the first generation for `initial_query`
    pub fn new<R>(source: R, initial_query: &str, config: &Config, evaluator: EvaluatorCommand) -> Self
    where
        R: Read + Send + 'static,
    {
        let mut events = EventLoop::new();
        let source = StreamReader::spawn_bounded(
            source,
            Handle::Source,
            events.notifier(),
            SOURCE_QUEUE_CAPACITY,
        );
        events.watch(Handle::Source);

        let debouncer = match config.evaluator.debounce_ms {
            0 => None,
            ms => Some(Debouncer::new(Duration::from_millis(ms))),
        };

        let mut app = Self {
            input: InputState::new(initial_query),
            view: ViewState::new(config.view.fallback_height),
            generation: None,
            buffer: InputBuffer::new(),
            source: Some(source),
            events,
            evaluator,
            next_generation: 0,
            debouncer,
            read_while_paused: config.input.read_while_paused,
            interrupt: None,
            should_quit: false,
            needs_render: true,
        };

        app.respawn(initial_query);
        app
    }

    pub fn query(&self) -> &str {
        self.input.query()
    }

    /// Output accumulated by the live generation
    pub fn live_output(&self) -> &[u8] {
        live_output(&self.generation)
    }

    pub fn source_closed(&self) -> bool {
        self.buffer.is_closed()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn mark_dirty(&mut self) {
        self.needs_render = true;
    }

    pub fn clear_dirty(&mut self) {
        self.needs_render = false;
    }

    pub fn should_render(&self) -> bool {
        self.needs_render
    }

    /// Repaint the body from the current display source
    pub(super) fn refresh_view(&mut self) {
        self.view.refresh(live_output(&self.generation));
        self.mark_dirty();
    }

    /// Repaint the body at the current offset while output is still arriving
    pub(super) fn repaint_view(&mut self) {
        self.view.repaint(live_output(&self.generation));
        self.mark_dirty();
    }
}

/// Field-level accessor so callers can hold it alongside `&mut App::view`
pub(super) fn live_output(generation: &Option<Generation>) -> &[u8] {
    generation
        .as_ref()
        .map_or(&[][..], |generation| generation.output.as_slice())
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
