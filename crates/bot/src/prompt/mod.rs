// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Prompt adapters
//!
//! The bot asks a language model for reviews through [`PromptAdapter`]. The
//! model itself lives outside this crate, behind an external command.

mod command;
mod noop;

pub use command::CommandPromptAdapter;
pub use noop::NoOpPromptAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePromptAdapter;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from prompt operations
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("failed to spawn prompt command `{program}`: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("prompt command failed: {0}")]
    CommandFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sends a prompt to a model and collects its reply
#[async_trait]
pub trait PromptAdapter: Send + Sync + 'static {
    /// Reply messages, in order
    async fn prompt(&self, text: &str) -> Result<Vec<String>, PromptError>;
}
