//! jqed library - Interactive jq editor
//!
//! This library exposes the core functionality of jqed for testing purposes.

pub mod app;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod event_loop;
pub mod input;
pub mod scroll;
pub mod stream;
pub mod theme;
pub mod view;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use app::App;
pub use config::Config;
