// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bot configuration
//!
//! Loaded from TOML. Every field is optional:
//!
//! ```toml
//! state_dir = "./.github_bot_state"
//! log_path = "/tmp/relay-bot.log"
//! stats_interval = "30s"
//!
//! [bus]
//! history_limit = 500
//!
//! [prompt]
//! command = "kimi"
//! args = ["--print"]
//! ```

use crate::error::ConfigError;
use relay_core::BusConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory used for bot state when none is configured
pub const DEFAULT_BOT_STATE_DIR: &str = "./.github_bot_state";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Directory for the file state backend
    pub state_dir: PathBuf,
    /// Log file; logs go to stderr when unset
    pub log_path: Option<PathBuf>,
    /// How often to log bot statistics; disabled when unset
    #[serde(with = "humantime_serde", default)]
    pub stats_interval: Option<Duration>,
    pub bus: BusConfig,
    pub prompt: PromptConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(DEFAULT_BOT_STATE_DIR),
            log_path: None,
            stats_interval: None,
            bus: BusConfig::default(),
            prompt: PromptConfig::default(),
        }
    }
}

/// External command that answers prompts
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Program to run; the prompt is written to its stdin
    pub command: Option<String>,
    pub args: Vec<String>,
}

impl BotConfig {
    /// Read configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
