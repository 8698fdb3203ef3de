// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted PR review state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const SUMMARY_FALLBACK_CHARS: usize = 200;
const RAW_REPLY_CHARS: usize = 500;

/// Where a PR is in the review cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrStatus {
    Pending,
    Reviewing,
    Approved,
    ChangesRequested,
    Error,
}

impl fmt::Display for PrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrStatus::Pending => "pending",
            PrStatus::Reviewing => "reviewing",
            PrStatus::Approved => "approved",
            PrStatus::ChangesRequested => "changes_requested",
            PrStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// Stored context for one pull request, keyed `pr:{repo}#{number}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrContext {
    pub pr_id: String,
    pub repo: String,
    pub author: String,
    pub title: String,
    pub description: String,
    pub files: Vec<String>,
    pub review_comments: Vec<ReviewComment>,
    pub status: PrStatus,
}

impl PrContext {
    pub fn state_key(pr_id: &str) -> String {
        format!("pr:{}", pr_id)
    }
}

/// One completed review of a PR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewComment {
    pub timestamp: DateTime<Utc>,
    pub review: Review,
    /// Start of the model's reply
    pub raw: String,
}

impl ReviewComment {
    pub fn new(review: Review, reply: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            review,
            raw: truncate(reply, RAW_REPLY_CHARS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Approve,
    RequestChanges,
    Comment,
}

/// Structured review as requested from the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    pub summary: String,
    pub quality_score: u8,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub recommendation: Recommendation,
}

impl Default for Review {
    fn default() -> Self {
        Self {
            summary: String::new(),
            quality_score: 7,
            issues: Vec::new(),
            suggestions: Vec::new(),
            recommendation: Recommendation::Comment,
        }
    }
}

/// Extract the review JSON object from a model reply
///
/// Models wrap JSON in prose or code fences, so this parses the span from
/// the first `{` to the last `}`. A reply without a usable object becomes a
/// neutral comment summarizing the start of the text.
pub fn parse_review(reply: &str) -> Review {
    let parsed = match (reply.find('{'), reply.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            serde_json::from_str::<Review>(&reply[start..=end]).ok()
        }
        _ => None,
    };

    parsed.unwrap_or_else(|| Review {
        summary: truncate(reply, SUMMARY_FALLBACK_CHARS),
        ..Review::default()
    })
}

/// Stored triage of one issue, keyed `issue:{repo}#{number}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueAnalysis {
    pub issue_id: String,
    pub title: String,
    pub analysis: String,
    pub analyzed_at: DateTime<Utc>,
}

impl IssueAnalysis {
    pub fn state_key(issue_id: &str) -> String {
        format!("issue:{}", issue_id)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
#[path = "review_tests.rs"]
mod tests;
