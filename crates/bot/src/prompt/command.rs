// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External command prompt adapter

use super::{PromptAdapter, PromptError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs a command per prompt, feeding the prompt on stdin
///
/// Each line of the command's stdout is one reply message.
#[derive(Clone, Debug)]
pub struct CommandPromptAdapter {
    program: String,
    args: Vec<String>,
}

impl CommandPromptAdapter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl PromptAdapter for CommandPromptAdapter {
    async fn prompt(&self, text: &str) -> Result<Vec<String>, PromptError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| PromptError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        // stdin is written while stdout and stderr are drained
        let writer = child.stdin.take().map(|mut stdin| {
            let text = text.to_string();
            tokio::spawn(async move { stdin.write_all(text.as_bytes()).await })
        });

        let output = child.wait_with_output().await?;

        if let Some(writer) = writer {
            match writer.await {
                Ok(Ok(())) => {}
                // The command may answer without reading its input
                Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {
                    tracing::debug!(program = %self.program, "prompt command closed stdin early");
                }
                Ok(Err(e)) => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(program = %self.program, error = %e, "prompt stdin writer failed");
                }
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PromptError::CommandFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().map(String::from).collect())
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
