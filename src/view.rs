pub mod view_render;
mod view_state;

pub use view_state::{
    DEFAULT_FALLBACK_HEIGHT, ErrorBar, HELP_TEXT, PromptState, ScrollCommand, ViewState,
    clean_error_text, line_count, window,
};
