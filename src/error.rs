use thiserror::Error;

/// Failure modes of built-in and passthrough execution.
///
/// Every variant is caught at the point of execution and converted into a
/// rendered message; none of them ever propagate into the session loop.
/// End-of-input and interrupts are not errors — the line source reports those
/// as [`crate::line_source::ReadEvent`] variants instead.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Malformed built-in invocation. Printed as a usage line, always
    /// recoverable.
    #[error("{0}")]
    Usage(String),

    /// Missing target for `run` or `rm`. Carries the full message to print.
    #[error("{0}")]
    NotFound(String),

    /// Refusal to remove a directory that still has entries in it.
    #[error("Directory {0} is not empty.")]
    NotEmpty(String),

    /// The OS command interpreter exited with a non-zero status. `detail`
    /// holds whatever the interpreter wrote to stderr.
    #[error("command exited with status {status}: {detail}")]
    Execution { status: i32, detail: String },

    /// A `fetch` request failed before a body could be read.
    #[error("Failed to fetch page: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
