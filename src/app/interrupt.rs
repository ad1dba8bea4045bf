use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::{SIGINT, SIGTERM};

use super::app_state::App;

/// Turn SIGINT and SIGTERM into a flag the main loop checks every tick
///
/// Raw mode disables the terminal's own Ctrl+C handling, so these only arrive
/// from outside (`kill`, a supervising shell). Without a handler they would end
/// the process with the terminal still in raw mode and no trailer written.
pub fn register_interrupts() -> io::Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&flag))?;
    }
    Ok(flag)
}

impl App {
    pub fn set_interrupt_flag(&mut self, flag: Arc<AtomicBool>) {
        self.interrupt = Some(flag);
    }

    /// Quit on the next tick if a signal has been received
    pub fn poll_interrupt(&mut self) {
        if self
            .interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
        {
            log::debug!("interrupt received, quitting");
            self.should_quit = true;
        }
    }
}

#[cfg(test)]
#[path = "interrupt_tests.rs"]
mod interrupt_tests;
