// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op prompt adapter for when no model is configured.

use super::{PromptAdapter, PromptError};
use async_trait::async_trait;

/// Prompt adapter that never replies.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpPromptAdapter;

impl NoOpPromptAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PromptAdapter for NoOpPromptAdapter {
    async fn prompt(&self, _text: &str) -> Result<Vec<String>, PromptError> {
        Ok(Vec::new())
    }
}
