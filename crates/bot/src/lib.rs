// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! relay-bot: a GitHub review bot built on relay-core and relay-storage

pub mod config;
pub mod error;
pub mod github;
pub mod prompt;
pub mod review;
pub mod simulate;
pub mod webhook;

pub use config::{BotConfig, PromptConfig};
pub use error::{BotError, ConfigError};
pub use github::{BotStats, GitHubBot};
pub use prompt::{CommandPromptAdapter, NoOpPromptAdapter, PromptAdapter, PromptError};
pub use review::{IssueAnalysis, PrContext, PrStatus, Recommendation, Review};
pub use webhook::{translate, Delivery};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use prompt::FakePromptAdapter;
