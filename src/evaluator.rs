pub mod debouncer;
pub mod generation;
pub mod input_buffer;

use std::path::PathBuf;
use std::process::{Command, Stdio};

pub use debouncer::Debouncer;
pub use generation::{Generation, GenerationId, Phase};
pub use input_buffer::InputBuffer;

/// How to invoke the external query evaluator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatorCommand {
    pub program: PathBuf,
    /// Arguments placed before the query text
    pub args: Vec<String>,
}

impl EvaluatorCommand {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build the command for one generation, with the query as its final argument
    pub fn command(&self, query: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(query)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    pub fn display_name(&self) -> String {
        self.program.display().to_string()
    }
}

/// Locate `program` in PATH, failing before any UI is shown
pub fn locate(program: &str) -> Result<PathBuf, crate::error::JqedError> {
    which::which(program).map_err(|_| crate::error::JqedError::EvaluatorNotFound(program.into()))
}
