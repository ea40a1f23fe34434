use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::{CheckerOutput, CheckerRunner, ResolvedCommand};
use crate::error::LintError;

/// Runs the checker as a child process and waits for it to exit.
///
/// Stdout is captured line by line; stderr goes straight to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CheckerRunner for ProcessRunner {
    async fn run(&self, command: &ResolvedCommand) -> Result<CheckerOutput, LintError> {
        info!(command = %command, "running checker");
        let output = Command::new(&command.binary)
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|source| LintError::Spawn {
                program: command.binary.clone(),
                source,
            })?;

        let lines = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect::<Vec<_>>();
        debug!(status = ?output.status.code(), lines = lines.len(), "checker finished");
        Ok(CheckerOutput::new(output.status.code(), lines))
    }
}
