// Configuration type definitions

use serde::Deserialize;

use crate::view::DEFAULT_FALLBACK_HEIGHT;

/// Evaluator configuration section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Program looked up in PATH (or a path to it)
    #[serde(default = "default_command")]
    pub command: String,
    /// Extra arguments placed before the query
    #[serde(default)]
    pub args: Vec<String>,
    /// Wait for edits to settle before respawning; 0 respawns on every keystroke
    #[serde(default)]
    pub debounce_ms: u64,
}

fn default_command() -> String {
    "jq".to_string()
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig {
            command: default_command(),
            args: Vec::new(),
            debounce_ms: 0,
        }
    }
}

/// View configuration section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ViewConfig {
    /// Lines rendered before the terminal reports its size
    #[serde(default = "default_fallback_height")]
    pub fallback_height: u16,
}

fn default_fallback_height() -> u16 {
    DEFAULT_FALLBACK_HEIGHT
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            fallback_height: DEFAULT_FALLBACK_HEIGHT,
        }
    }
}

/// Source input configuration section
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct InputConfig {
    /// Keep reading the source while paused instead of holding it back
    #[serde(default)]
    pub read_while_paused: bool,
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
