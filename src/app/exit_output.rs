use std::borrow::Cow;

use super::app_state::App;

const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));
const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");

/// Quote `query` for pasting after `| jq` in a shell
///
/// The empty-string quotes that can surround the result are dropped.
pub fn shell_quote(query: &str) -> String {
    let query = query.trim();
    // Only a NUL byte makes quoting fail; such a query is printed as typed
    let quoted = shlex::try_quote(query).unwrap_or(Cow::Borrowed(query));
    let quoted: &str = &quoted;
    let quoted = quoted.strip_prefix("''").unwrap_or(quoted);
    let quoted = quoted.strip_suffix("''").unwrap_or(quoted);
    quoted.to_string()
}

impl App {
    /// Text written to the original stdout after the terminal is restored
    pub fn exit_trailer(&self) -> String {
        format!(
            "{}\njqed: jq editor {} {}\njqed: | jq {}\n",
            String::from_utf8_lossy(self.live_output()),
            VERSION,
            HOMEPAGE,
            shell_quote(self.query())
        )
    }

    /// Fallback written to stderr when stdout is gone
    pub fn exit_command(&self) -> String {
        format!("jq {}\n", shell_quote(self.query()))
    }
}

#[cfg(test)]
#[path = "exit_output_tests.rs"]
mod exit_output_tests;
