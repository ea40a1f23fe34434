use std::path::PathBuf;

use thiserror::Error;

use crate::report::FAILURE_MESSAGE;

/// Every way a lint run can stop. All of them end the current invocation.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("No directory to lint\n\nExample:\n\n    $ wp-lint lint path/to/directory\n")]
    Usage,
    #[error("The file \"{}\" does not exist", .path.display())]
    NotFound { path: PathBuf },
    #[error("Cannot find a standard to use.")]
    ConfigurationMissing,
    #[error("{}", .messages.join("\n"))]
    ExternalTool { messages: Vec<String> },
    #[error("{}", FAILURE_MESSAGE)]
    StyleViolation,
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid lint configuration: {0}")]
    Config(#[from] config::ConfigError),
}

impl LintError {
    /// Messages to show the user, one per line of output.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::ExternalTool { messages } => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}
