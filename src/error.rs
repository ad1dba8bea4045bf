use thiserror::Error;

#[derive(Debug, Error)]
pub enum JqedError {
    #[error("{0} does not seem to be installed\nPerhaps you want: sudo apt install jq")]
    EvaluatorNotFound(String),

    #[error(
        "error: jqed requires some data piped on standard input, for example try: `ip --json link | jqed`"
    )]
    SourceIsTerminal,

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
