//! Shared test utilities for jqed
//!
//! This module provides common test fixtures and helper functions
//! used across multiple test modules.

#[cfg(test)]
pub mod test_helpers {
    use crate::app::App;
    use crate::config::Config;
    use crate::evaluator::EvaluatorCommand;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::io::{self, Cursor, Read};
    use std::sync::mpsc::{Receiver, Sender, channel};
    use std::time::{Duration, Instant};

    /// Test fixture: a small stream of JSON documents
    pub const TEST_JSON: &str = "{\"a\":1,\"b\":[1,2]}\n{\"a\":2,\"b\":[]}\n";

    /// Source that yields each sent message from a separate `read` call and reports
    /// end-of-stream once the sender is dropped
    pub struct ChannelSource {
        rx: Receiver<Vec<u8>>,
        pending: Vec<u8>,
        pos: usize,
    }

    impl Read for ChannelSource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.pending.len() {
                match self.rx.recv() {
                    Ok(message) => {
                        self.pending = message;
                        self.pos = 0;
                    }
                    Err(_) => return Ok(0),
                }
            }
            let n = buf.len().min(self.pending.len() - self.pos);
            buf[..n].copy_from_slice(&self.pending[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    /// A source fed by the test through the returned sender
    pub fn channel_source() -> (Sender<Vec<u8>>, ChannelSource) {
        let (tx, rx) = channel();
        (
            tx,
            ChannelSource {
                rx,
                pending: Vec::new(),
                pos: 0,
            },
        )
    }

    /// Evaluator running `script` under `sh -c`; the query arrives as `$1`
    pub fn sh_evaluator(script: &str) -> EvaluatorCommand {
        EvaluatorCommand::new("sh", vec!["-c".into(), script.into(), "sh".into()])
    }

    /// App over a fixed source, evaluated by `script`
    pub fn test_app(script: &str, source: &str) -> App {
        app_with_query(script, source, "")
    }

    /// Like [`test_app`], with the prompt pre-filled
    pub fn app_with_query(script: &str, source: &str, query: &str) -> App {
        App::new(
            Cursor::new(source.as_bytes().to_vec()),
            query,
            &Config::default(),
            sh_evaluator(script),
        )
    }

    /// App over a source the test feeds by hand
    pub fn streaming_app(script: &str, config: &Config) -> (Sender<Vec<u8>>, App) {
        let (tx, source) = channel_source();
        let app = App::new(source, "", config, sh_evaluator(script));
        (tx, app)
    }

    /// Dispatch readiness events until `done` holds, panicking after a few seconds
    pub fn pump_until(app: &mut App, mut done: impl FnMut(&App) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(app) {
            assert!(Instant::now() < deadline, "condition not reached in time");
            app.pump_streams(Duration::from_millis(20));
        }
    }

    /// Dispatch readiness events for `duration` regardless of what happens
    pub fn pump_for(app: &mut App, duration: Duration) {
        let deadline = Instant::now() + duration;
        while Instant::now() < deadline {
            app.pump_streams(Duration::from_millis(10));
        }
    }

    /// Helper to create a KeyEvent without modifiers
    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    /// Helper to create a KeyEvent with specific modifiers
    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    /// Type `text` into the prompt one key at a time
    pub fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
    }
}
