// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake prompt adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PromptAdapter, PromptError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Reply {
    Messages(Vec<String>),
    Fail(String),
}

/// Fake prompt adapter for testing
///
/// Replies are chosen by the first rule whose needle occurs in the prompt,
/// so concurrent prompts get deterministic answers. Unmatched prompts get
/// no messages.
#[derive(Clone, Default)]
pub struct FakePromptAdapter {
    rules: Arc<Mutex<Vec<(String, Reply)>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FakePromptAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `messages` to prompts containing `needle`
    pub fn reply_when(&self, needle: &str, messages: &[&str]) {
        self.rules.lock().unwrap_or_else(|e| e.into_inner()).push((
            needle.to_string(),
            Reply::Messages(messages.iter().map(|m| m.to_string()).collect()),
        ));
    }

    /// Fail prompts containing `needle`
    pub fn fail_when(&self, needle: &str, message: &str) {
        self.rules
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((needle.to_string(), Reply::Fail(message.to_string())));
    }

    /// Every prompt received, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl PromptAdapter for FakePromptAdapter {
    async fn prompt(&self, text: &str) -> Result<Vec<String>, PromptError> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());

        let reply = self
            .rules
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|(needle, _)| text.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Messages(messages)) => Ok(messages),
            Some(Reply::Fail(message)) => Err(PromptError::CommandFailed(message)),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
