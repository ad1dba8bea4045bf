//! Generation lifecycle: respawn on query change and the stdout/stderr callbacks

use std::mem;

use super::app_state::App;
use crate::evaluator::{Generation, GenerationId};
use crate::event_loop::Handle;

impl App {
    /// Replace the live generation with a fresh evaluator for `query`
    ///
    /// The new process is replayed the whole input buffer before its pipes are
    /// watched. Runs to completion, so no callback ever sees a half-replaced
    /// generation.
    pub fn respawn(&mut self, query: &str) {
        if let Some(mut previous) = self.generation.take() {
            self.events.unwatch(Handle::Output(previous.id()));
            self.events.unwatch(Handle::Error(previous.id()));
            previous.terminate();
            self.view.clear_error_bar();

            if !previous.output.is_empty() && !self.view.paused {
                self.view.commit(&previous.output);
            }
        }
        self.view.erroring = false;

        let id = GenerationId(self.next_generation);
        self.next_generation += 1;
        log::debug!("respawn {} for {:?}", id, query);

        match Generation::spawn(id, &self.evaluator, query, &self.events.notifier()) {
            Ok(generation) => self.generation = Some(generation),
            Err(e) => {
                log::error!("{}", e);
                self.view.show_error(e.to_string().as_bytes());
                self.view.erroring = true;
                self.refresh_view();
                return;
            }
        }

        self.replay_input(id);

        let buffer_closed = self.buffer.is_closed();
        if let Some(generation) = self.generation.as_mut() {
            if buffer_closed {
                generation.close_stdin();
            }
            if generation.output_open() {
                self.events.watch(Handle::Output(id));
            }
            if generation.errors_open() {
                self.events.watch(Handle::Error(id));
            }
            generation.mark_live();
        }
        self.repaint_view();
    }

    /// Feed the input buffer to generation `id`, checking its pipes after every chunk
    fn replay_input(&mut self, id: GenerationId) {
        let buffer = mem::take(&mut self.buffer);
        for chunk in buffer.replay_chunks() {
            let Some(generation) = self.generation.as_mut() else {
                break;
            };
            if !generation.stdin_open() {
                break;
            }
            generation.feed(chunk);

            self.on_output_ready(id);
            self.on_error_ready(id);
        }
        self.buffer = buffer;
    }

    /// Evaluator stdout of generation `id` has data or reached end-of-stream
    pub fn on_output_ready(&mut self, id: GenerationId) {
        let Some(generation) = self.generation.as_mut().filter(|g| g.id() == id) else {
            return;
        };

        let drained = generation.drain_output();
        if !drained.bytes.is_empty() {
            generation.output.extend_from_slice(&drained.bytes);
            if !self.view.paused {
                self.view.repaint(&generation.output);
                self.needs_render = true;
            }
        }

        // Output is complete: clamp the offset against its final line count
        if drained.eof {
            log::debug!("generation {}: stdout closed", id);
            self.events.unwatch(Handle::Output(id));
            let errored = generation.is_erroring();
            generation.finish();
            if !errored {
                self.view.refresh(&generation.output);
                self.needs_render = true;
            }
        }
    }

    /// Evaluator stderr of generation `id` has data or reached end-of-stream
    pub fn on_error_ready(&mut self, id: GenerationId) {
        let Some(generation) = self.generation.as_mut().filter(|g| g.id() == id) else {
            return;
        };

        let drained = generation.drain_errors();
        if drained.is_spurious() {
            return;
        }

        if !drained.bytes.is_empty() {
            generation.errors.extend_from_slice(&drained.bytes);
            self.view.show_error(&generation.errors);
        }

        if drained.eof {
            log::debug!("generation {}: stderr closed", id);
            self.events.unwatch(Handle::Error(id));
            generation.close_errors();
        }

        if generation.is_erroring() {
            generation.mark_erroring();
            self.view.erroring = true;
        } else if generation.output.is_empty() && !self.view.paused {
            // Neither output nor error: the committed output no longer matches the query
            self.view.clear_committed();
            self.view.repaint(&generation.output);
        }
        self.needs_render = true;
    }
}

#[cfg(test)]
#[path = "evaluator_events_tests.rs"]
mod evaluator_events_tests;
