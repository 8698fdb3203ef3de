// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event-driven GitHub review bot
//!
//! Webhook events flow through the bus:
//!
//! - `github.pr.opened` stores a [`PrContext`] and requests a review
//! - `github.pr.updated` refreshes the context and requests a high-priority review
//! - `agent.pr.review_requested` prompts the model and records its review
//! - `github.issue.opened` prompts for triage and stores the analysis

use crate::error::BotError;
use crate::prompt::PromptAdapter;
use crate::review::{
    parse_review, IssueAnalysis, PrContext, PrStatus, Recommendation, ReviewComment,
};
use crate::webhook::{Delivery, ISSUE_OPENED, PR_OPENED, PR_UPDATED};
use chrono::Utc;
use relay_core::{handler_fn, BoxError, Event, EventBus};
use relay_storage::StateManager;
use serde::Serialize;
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;

pub const REVIEW_REQUESTED: &str = "agent.pr.review_requested";
pub const REVIEW_COMPLETE: &str = "agent.pr.review_complete";
/// Periodic tick that logs [`BotStats`]
pub const STATS_TICK: &str = "bot.stats";

/// Source stamped on events the bot emits itself
pub const BOT_SOURCE: &str = "github-bot";

/// Snapshot of bot activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotStats {
    pub handlers: usize,
    pub events_seen: usize,
    pub active_prs: usize,
    pub analyzed_issues: usize,
}

/// GitHub bot wired onto an event bus
///
/// The bus handlers hold only a weak reference to the bot. Once the last
/// `GitHubBot` handle is dropped they stay subscribed but do nothing.
#[derive(Clone)]
pub struct GitHubBot {
    inner: Arc<BotInner>,
}

struct BotInner {
    bus: EventBus,
    state: StateManager,
    prompt: Arc<dyn PromptAdapter>,
}

impl GitHubBot {
    /// Create the bot and subscribe its handlers to `bus`
    pub fn new(bus: EventBus, state: StateManager, prompt: Arc<dyn PromptAdapter>) -> Self {
        let bot = Self {
            inner: Arc::new(BotInner { bus, state, prompt }),
        };
        bot.subscribe(PR_OPENED, |bot, event| async move { bot.on_pr_opened(&event).await });
        bot.subscribe(PR_UPDATED, |bot, event| async move { bot.on_pr_updated(&event).await });
        bot.subscribe(REVIEW_REQUESTED, |bot, event| async move {
            bot.review_pr(&event).await
        });
        bot.subscribe(ISSUE_OPENED, |bot, event| async move {
            bot.on_issue_opened(&event).await
        });
        bot.subscribe(STATS_TICK, |bot, _| async move { bot.log_stats().await });
        bot
    }

    pub fn bus(&self) -> &EventBus {
        &self.inner.bus
    }

    pub fn state(&self) -> &StateManager {
        &self.inner.state
    }

    fn subscribe<F, Fut>(&self, pattern: &str, f: F)
    where
        F: Fn(GitHubBot, Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BotError>> + Send + 'static,
    {
        let inner = Arc::downgrade(&self.inner);
        let pattern_name = pattern.to_string();
        self.bus().on(
            pattern,
            handler_fn(move |event| {
                let fut = inner.upgrade().map(|inner| f(GitHubBot { inner }, event));
                if fut.is_none() {
                    tracing::debug!(pattern = %pattern_name, "bot dropped, ignoring event");
                }
                async move {
                    match fut {
                        Some(fut) => fut.await.map_err(BoxError::from),
                        None => Ok(()),
                    }
                }
            }),
        );
    }

    /// Translate a webhook delivery and emit it
    ///
    /// Returns false for deliveries the bot ignores.
    pub async fn handle_delivery(&self, delivery: Delivery) -> Result<bool, BotError> {
        match delivery.into_event() {
            Some(event) => {
                self.inner.bus.emit(event).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn on_pr_opened(&self, event: &Event) -> Result<(), BotError> {
        let pr_id = item_id(event)?;
        tracing::info!(pr_id = %pr_id, "new PR opened");

        let context = PrContext {
            pr_id: pr_id.clone(),
            repo: text_field(event, "repo").unwrap_or_default(),
            author: text_field(event, "author").unwrap_or_default(),
            title: text_field(event, "title").unwrap_or_default(),
            description: text_field(event, "description").unwrap_or_default(),
            files: files(event),
            review_comments: Vec::new(),
            status: PrStatus::Pending,
        };
        self.inner.state
            .set(&PrContext::state_key(&pr_id), &context, None)
            .await?;

        self.request_review(&pr_id, "normal").await
    }

    async fn on_pr_updated(&self, event: &Event) -> Result<(), BotError> {
        let pr_id = item_id(event)?;
        let key = PrContext::state_key(&pr_id);

        let Some(mut context) = self.inner.state.get_opt::<PrContext>(&key).await? else {
            tracing::debug!(pr_id = %pr_id, "update for unknown PR");
            return Ok(());
        };
        tracing::info!(pr_id = %pr_id, "PR updated");

        context.files = files(event);
        context.status = PrStatus::Pending;
        self.inner.state.set(&key, &context, None).await?;

        self.request_review(&pr_id, "high").await
    }

    async fn request_review(&self, pr_id: &str, priority: &str) -> Result<(), BotError> {
        let event = Event::new(REVIEW_REQUESTED)
            .with_field("pr_id", pr_id)
            .with_field("priority", priority)
            .with_source(BOT_SOURCE);
        self.inner.bus.emit(event).await?;
        Ok(())
    }

    async fn review_pr(&self, event: &Event) -> Result<(), BotError> {
        let pr_id = event
            .get_str("pr_id")
            .ok_or_else(|| missing(event, "pr_id"))?
            .to_string();
        let priority = event.get_str("priority").unwrap_or("normal");
        let key = PrContext::state_key(&pr_id);

        let Some(mut context) = self.inner.state.get_opt::<PrContext>(&key).await? else {
            tracing::warn!(pr_id = %pr_id, "no context found for PR");
            return Ok(());
        };
        if context.status == PrStatus::Approved {
            tracing::info!(pr_id = %pr_id, "PR already approved, skipping");
            return Ok(());
        }

        context.status = PrStatus::Reviewing;
        self.inner.state.set(&key, &context, None).await?;
        tracing::info!(pr_id = %pr_id, priority, "reviewing PR");

        let reply = match self.inner.prompt.prompt(&review_prompt(&context)).await {
            Ok(messages) => messages.join("\n"),
            Err(e) => {
                context.status = PrStatus::Error;
                self.inner.state.set(&key, &context, None).await?;
                return Err(e.into());
            }
        };

        let review = parse_review(&reply);
        let recommendation = review.recommendation;
        let quality_score = review.quality_score;
        context.status = match recommendation {
            Recommendation::Approve => PrStatus::Approved,
            _ => PrStatus::ChangesRequested,
        };
        context.review_comments.push(ReviewComment::new(review, &reply));
        self.inner.state.set(&key, &context, None).await?;
        tracing::info!(pr_id = %pr_id, status = %context.status, quality_score, "review complete");

        let complete = Event::new(REVIEW_COMPLETE)
            .with_field("pr_id", pr_id)
            .with_field("recommendation", json!(recommendation))
            .with_field("quality_score", quality_score)
            .with_source(BOT_SOURCE);
        self.inner.bus.emit(complete).await?;
        Ok(())
    }

    async fn on_issue_opened(&self, event: &Event) -> Result<(), BotError> {
        let issue_id = item_id(event)?;
        tracing::info!(issue_id = %issue_id, "new issue opened");

        let title = text_field(event, "title").unwrap_or_default();
        let body = text_field(event, "body").unwrap_or_else(|| "No description".to_string());
        let messages = self.inner.prompt.prompt(&issue_prompt(&title, &body)).await?;

        let analysis = IssueAnalysis {
            issue_id: issue_id.clone(),
            title,
            analysis: messages.join("\n"),
            analyzed_at: Utc::now(),
        };
        self.inner.state
            .set(&IssueAnalysis::state_key(&issue_id), &analysis, None)
            .await?;
        tracing::info!(issue_id = %issue_id, "issue analyzed");
        Ok(())
    }

    /// Current activity counters
    pub async fn stats(&self) -> Result<BotStats, BotError> {
        Ok(BotStats {
            handlers: self.inner.bus.handler_count(None),
            events_seen: self.inner.bus.get_history(None, usize::MAX).len(),
            active_prs: self.inner.state.list("pr:").await?.len(),
            analyzed_issues: self.inner.state.list("issue:").await?.len(),
        })
    }

    async fn log_stats(&self) -> Result<(), BotError> {
        let stats = self.stats().await?;
        tracing::info!(
            handlers = stats.handlers,
            events_seen = stats.events_seen,
            active_prs = stats.active_prs,
            analyzed_issues = stats.analyzed_issues,
            "bot stats"
        );
        Ok(())
    }

    /// Status of every tracked PR, by state key
    pub async fn pr_statuses(&self) -> Result<Vec<(String, PrStatus)>, BotError> {
        let mut statuses = Vec::new();
        for key in self.inner.state.list("pr:").await? {
            if let Some(context) = self.inner.state.get_opt::<PrContext>(&key).await? {
                statuses.push((key, context.status));
            }
        }
        Ok(statuses)
    }
}

/// `{repo}#{number}` identifier of the PR or issue an event refers to
fn item_id(event: &Event) -> Result<String, BotError> {
    let repo = text_field(event, "repo").ok_or_else(|| missing(event, "repo"))?;
    let number = text_field(event, "number").ok_or_else(|| missing(event, "number"))?;
    Ok(format!("{}#{}", repo, number))
}

/// String or number payload field as text
fn text_field(event: &Event, key: &str) -> Option<String> {
    match event.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn files(event: &Event) -> Vec<String> {
    event
        .get("files")
        .and_then(Value::as_array)
        .map(|files| {
            files
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn missing(event: &Event, field: &'static str) -> BotError {
    BotError::MissingField {
        event_type: event.event_type().to_string(),
        field,
    }
}

fn review_prompt(context: &PrContext) -> String {
    format!(
        r#"Review this Pull Request:

**Title:** {title}
**Author:** {author}
**Description:** {description}

**Files changed:** {files}

Please provide:
1. Summary of changes
2. Code quality assessment
3. Potential issues or bugs
4. Suggestions for improvement
5. Overall recommendation (approve/request changes)

Format your response as JSON:
{{
    "summary": "brief summary",
    "quality_score": 1-10,
    "issues": ["issue1", "issue2"],
    "suggestions": ["suggestion1"],
    "recommendation": "approve|request_changes|comment"
}}"#,
        title = context.title,
        author = context.author,
        description = context.description,
        files = context.files.join(", "),
    )
}

fn issue_prompt(title: &str, body: &str) -> String {
    format!(
        r#"Analyze this GitHub issue:

**Title:** {title}
**Description:** {body}

Suggest:
1. Labels (bug, feature, documentation, etc.)
2. Priority (low, medium, high, critical)
3. Whether it needs immediate attention

Format as JSON."#
    )
}

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;
