// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bot error types

use crate::prompt::PromptError;
use relay_core::BusError;
use relay_storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors loading bot configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised while handling bot events
#[derive(Debug, Error)]
pub enum BotError {
    #[error("{event_type} event is missing `{field}`")]
    MissingField {
        event_type: String,
        field: &'static str,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Bus(#[from] BusError),
}
