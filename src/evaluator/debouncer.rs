use std::time::{Duration, Instant};

/// Delays a respawn until the query has stopped changing for `delay`
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    /// Timestamp of the last edit that triggered a debounce
    last_input_time: Option<Instant>,
    /// Whether a respawn is waiting for the debounce to expire
    pending_execution: bool,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_input_time: None,
            pending_execution: false,
        }
    }

    pub fn schedule_execution(&mut self) {
        self.schedule_execution_at(Instant::now());
    }

    fn schedule_execution_at(&mut self, now: Instant) {
        self.last_input_time = Some(now);
        self.pending_execution = true;
    }

    pub fn should_execute(&self) -> bool {
        self.should_execute_at(Instant::now())
    }

    fn should_execute_at(&self, now: Instant) -> bool {
        if !self.pending_execution {
            return false;
        }

        match self.last_input_time {
            Some(last_time) => now.saturating_duration_since(last_time) >= self.delay,
            None => false,
        }
    }

    /// Time left before a pending respawn is due, if one is pending
    pub fn remaining(&self) -> Option<Duration> {
        if !self.pending_execution {
            return None;
        }
        self.last_input_time
            .map(|last| self.delay.saturating_sub(last.elapsed()))
    }

    pub fn mark_executed(&mut self) {
        self.pending_execution = false;
        self.last_input_time = None;
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
