//! One evaluator child process and everything it produced
//!
//! A generation owns its child and both stream readers. Dropping it closes every
//! pipe, kills the child and reaps it, so a replaced generation can never leak bytes
//! into the display or leave a zombie behind.

use std::fmt;
use std::io::Write;
use std::process::{Child, ChildStdin};

use super::EvaluatorCommand;
use crate::error::JqedError;
use crate::event_loop::{Handle, Notifier};
use crate::stream::{Drained, StreamReader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenerationId(pub u64);

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Spawned, input replay in progress
    Spawning,
    /// Replay done, pipes watched
    Live,
    /// Produced stderr output
    Erroring,
    /// Stdout reached end-of-stream, shutting down
    Closing,
    /// Process reaped
    Dead,
}

pub struct Generation {
    id: GenerationId,
    query: String,
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: Option<StreamReader>,
    stderr: Option<StreamReader>,
    /// Accumulated stdout bytes
    pub output: Vec<u8>,
    /// Accumulated stderr bytes
    pub errors: Vec<u8>,
    phase: Phase,
}

impl Generation {
    /// Start the evaluator for `query` with all three pipes wired
    pub fn spawn(
        id: GenerationId,
        evaluator: &EvaluatorCommand,
        query: &str,
        notifier: &Notifier,
    ) -> Result<Self, JqedError> {
        let mut child = evaluator
            .command(query)
            .spawn()
            .map_err(|source| JqedError::Spawn {
                program: evaluator.display_name(),
                source,
            })?;

        let stdin = child.stdin.take();
        let stdout = child
            .stdout
            .take()
            .map(|out| StreamReader::spawn(out, Handle::Output(id), notifier.clone()));
        let stderr = child
            .stderr
            .take()
            .map(|err| StreamReader::spawn(err, Handle::Error(id), notifier.clone()));

        log::debug!("generation {} spawned (pid {}) for {:?}", id, child.id(), query);

        Ok(Self {
            id,
            query: query.to_string(),
            child,
            stdin,
            stdout,
            stderr,
            output: Vec::new(),
            errors: Vec::new(),
            phase: Phase::Spawning,
        })
    }

    pub fn id(&self) -> GenerationId {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_erroring(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn stdin_open(&self) -> bool {
        self.stdin.is_some()
    }

    pub fn output_open(&self) -> bool {
        self.stdout.is_some()
    }

    pub fn errors_open(&self) -> bool {
        self.stderr.is_some()
    }

    /// Replay finished and pipes are being watched
    pub fn mark_live(&mut self) {
        if self.phase == Phase::Spawning {
            self.phase = Phase::Live;
        }
    }

    pub fn mark_erroring(&mut self) {
        if matches!(self.phase, Phase::Spawning | Phase::Live) {
            self.phase = Phase::Erroring;
        }
    }

    /// Write `bytes` to the evaluator's stdin
    ///
    /// A failed write means the process already exited (typically an invalid
    /// query); stdin is closed and the failure is swallowed because stderr reports
    /// the actual cause.
    pub fn feed(&mut self, bytes: &[u8]) {
        let Some(stdin) = self.stdin.as_mut() else {
            return;
        };
        if let Err(e) = stdin.write_all(bytes) {
            log::debug!("generation {}: stdin write failed, closing: {}", self.id, e);
            self.stdin = None;
        }
    }

    pub fn close_stdin(&mut self) {
        if self.stdin.take().is_some() {
            log::debug!("generation {}: stdin closed", self.id);
        }
    }

    /// Drain stdout; a closed pipe reads as end-of-stream
    pub fn drain_output(&mut self) -> Drained {
        match self.stdout.as_mut() {
            Some(reader) => reader.drain(),
            None => Drained {
                bytes: Vec::new(),
                eof: true,
            },
        }
    }

    /// Drain stderr; a closed pipe reads as end-of-stream
    pub fn drain_errors(&mut self) -> Drained {
        match self.stderr.as_mut() {
            Some(reader) => reader.drain(),
            None => Drained {
                bytes: Vec::new(),
                eof: true,
            },
        }
    }

    pub fn close_output(&mut self) {
        self.stdout = None;
    }

    pub fn close_errors(&mut self) {
        self.stderr = None;
    }

    /// Stdout hit end-of-stream: close stdout and stdin, then reap
    pub fn finish(&mut self) {
        self.phase = Phase::Closing;
        self.close_output();
        self.close_stdin();
        self.reap();
    }

    /// Close all pipes, kill the process and reap it
    ///
    /// `Child::kill` sends SIGKILL on Unix, so the reap that follows cannot hang on
    /// an evaluator that ignores termination requests.
    pub fn terminate(&mut self) {
        if self.phase == Phase::Dead {
            return;
        }
        self.close_stdin();
        self.close_output();
        self.close_errors();
        if let Err(e) = self.child.kill() {
            // Already exited on its own
            log::debug!("generation {}: kill: {}", self.id, e);
        }
        self.reap();
    }

    fn reap(&mut self) {
        match self.child.wait() {
            Ok(status) => log::debug!("generation {} exited: {}", self.id, status),
            Err(e) => log::debug!("generation {}: wait failed: {}", self.id, e),
        }
        self.phase = Phase::Dead;
    }
}

impl Drop for Generation {
    fn drop(&mut self) {
        self.terminate();
    }
}

#[cfg(test)]
#[path = "generation_tests.rs"]
mod generation_tests;
