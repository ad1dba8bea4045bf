mod app_events;
mod app_render;
mod app_state;
mod evaluator_events;
mod exit_output;
mod interrupt;
mod relay;

// Re-export public types
pub use app_state::App;
pub use exit_output::shell_quote;
pub use interrupt::register_interrupts;
