use std::{fmt, path::PathBuf};

use async_trait::async_trait;
use serde::Serialize;

use crate::error::LintError;

pub mod process;

pub use process::ProcessRunner;

/// A fully composed checker invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCommand {
    pub binary: String,
    pub standard: String,
    pub extensions: Vec<String>,
    pub target: PathBuf,
}

impl ResolvedCommand {
    pub fn new(
        binary: impl Into<String>,
        standard: impl Into<String>,
        extensions: Vec<String>,
        target: impl Into<PathBuf>,
    ) -> Self {
        Self {
            binary: binary.into(),
            standard: standard.into(),
            extensions,
            target: target.into(),
        }
    }

    /// Arguments in the order the checker receives them; the target path is last.
    pub fn args(&self) -> Vec<String> {
        vec![
            "-s".to_string(),
            format!("--extensions={}", self.extensions.join(",")),
            format!("--standard={}", self.standard),
            self.target.to_string_lossy().into_owned(),
        ]
    }
}

impl fmt::Display for ResolvedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.binary, self.args().join(" "))
    }
}

/// What the checker printed on stdout and how it exited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckerOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub lines: Vec<String>,
}

impl CheckerOutput {
    pub fn new(code: Option<i32>, lines: Vec<String>) -> Self {
        Self { code, lines }
    }

    pub fn succeeded(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes a composed command and collects its output.
#[async_trait]
pub trait CheckerRunner: Send + Sync {
    async fn run(&self, command: &ResolvedCommand) -> Result<CheckerOutput, LintError>;
}
