//! Centralized theme configuration for all UI components.
//!
//! All colors and styles are defined here. Render files use `theme::module::CONSTANT`
//! instead of hardcoding `Color::*` values.

use ratatui::style::{Color, Modifier, Style};

/// Core color palette
pub mod palette {
    use super::*;

    pub const TEXT: Color = Color::Reset;
    pub const GREEN: Color = Color::LightGreen;
    pub const YELLOW: Color = Color::Yellow;
    pub const RED: Color = Color::LightRed;

    pub const CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);
}

/// Prompt caption and query text
pub mod prompt {
    use super::*;

    pub const OK: Style = Style::new().fg(palette::GREEN).add_modifier(Modifier::BOLD);
    pub const PAUSED: Style = Style::new().fg(palette::YELLOW).add_modifier(Modifier::BOLD);
    pub const ERROR: Style = Style::new().fg(palette::RED).add_modifier(Modifier::BOLD);

    pub const QUERY: Style = Style::new().add_modifier(Modifier::BOLD);
    pub const CURSOR: Style = palette::CURSOR;
}

/// Result body
pub mod body {
    use super::*;

    pub const TEXT: Style = Style::new().fg(palette::TEXT);
}

/// Bottom bar
pub mod error_bar {
    use super::*;

    pub const HELP: Style = Style::new().add_modifier(Modifier::BOLD);
    pub const ERROR: Style = Style::new().fg(palette::RED).add_modifier(Modifier::BOLD);
    pub const WARNING: Style = Style::new().fg(palette::YELLOW).add_modifier(Modifier::BOLD);
}
