use super::app_state::App;
use crate::event_loop::Handle;

impl App {
    /// Source has data or reached end-of-stream
    ///
    /// New bytes are kept for future generations and forwarded to the live one.
    pub fn on_source_ready(&mut self) {
        let Some(source) = self.source.as_mut() else {
            return;
        };

        let drained = source.drain();
        if !drained.bytes.is_empty() {
            self.buffer.append(&drained.bytes);
            if let Some(generation) = self.generation.as_mut() {
                generation.feed(&drained.bytes);
            }
        }

        if drained.eof {
            log::debug!("source closed after {} bytes", self.buffer.len());
            self.events.unwatch(Handle::Source);
            self.source = None;
            self.buffer.close();
            if let Some(generation) = self.generation.as_mut() {
                generation.close_stdin();
            }
        }
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod relay_tests;
