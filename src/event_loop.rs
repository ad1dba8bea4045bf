//! Readiness registration for the controller's live handles
//!
//! Reader threads post a [`Handle`] on a shared wake channel every time they queue
//! data. The main thread blocks on that channel and dispatches only the handles that
//! are currently watched, so notifications from a paused source or from a generation
//! that was already replaced are dropped here.

use std::collections::HashSet;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError, channel};
use std::time::{Duration, Instant};

use crate::evaluator::GenerationId;

/// A readable handle the controller can watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// The JSON source (original stdin)
    Source,
    /// Evaluator stdout for one generation
    Output(GenerationId),
    /// Evaluator stderr for one generation
    Error(GenerationId),
}

/// Cloneable sender side handed to reader threads
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Sender<Handle>,
}

impl Notifier {
    /// Signal that `handle` may have data pending
    ///
    /// Returns false once the event loop is gone, which tells the reader thread
    /// nobody will ever consume its data.
    pub fn notify(&self, handle: Handle) -> bool {
        self.tx.send(handle).is_ok()
    }
}

pub struct EventLoop {
    tx: Sender<Handle>,
    rx: Receiver<Handle>,
    watched: HashSet<Handle>,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            watched: HashSet::new(),
        }
    }

    pub fn notifier(&self) -> Notifier {
        Notifier {
            tx: self.tx.clone(),
        }
    }

    /// Start watching `handle`
    ///
    /// Schedules an immediate readiness check so data queued while the handle was
    /// unwatched is picked up without waiting for the next notification.
    pub fn watch(&mut self, handle: Handle) {
        log::debug!("watch {:?}", handle);
        self.watched.insert(handle);
        let _ = self.tx.send(handle);
    }

    /// Stop watching `handle`, returning whether it was watched
    pub fn unwatch(&mut self, handle: Handle) -> bool {
        let removed = self.watched.remove(&handle);
        if removed {
            log::debug!("unwatch {:?}", handle);
        }
        removed
    }

    pub fn is_watched(&self, handle: Handle) -> bool {
        self.watched.contains(&handle)
    }

    /// Block up to `timeout` for the next watched handle to become ready
    pub fn next_ready(&mut self, timeout: Duration) -> Option<Handle> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(handle) if self.watched.contains(&handle) => return Some(handle),
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None;
                }
            }
        }
    }

    /// Next watched handle that is already ready, without blocking
    pub fn try_next_ready(&mut self) -> Option<Handle> {
        loop {
            match self.rx.try_recv() {
                Ok(handle) if self.watched.contains(&handle) => return Some(handle),
                Ok(_) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }
}

#[cfg(test)]
#[path = "event_loop_tests.rs"]
mod event_loop_tests;
