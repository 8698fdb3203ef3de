// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! GitHub webhook translation
//!
//! Maps webhook deliveries onto bus events. Only payload translation lives
//! here; receiving deliveries is the caller's concern.

use relay_core::{Event, EventData};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

/// Source stamped on translated events
pub const WEBHOOK_SOURCE: &str = "github-webhook";

pub const PR_OPENED: &str = "github.pr.opened";
pub const PR_UPDATED: &str = "github.pr.updated";
pub const ISSUE_OPENED: &str = "github.issue.opened";

/// One webhook delivery: the `X-GitHub-Event` kind and its JSON body
#[derive(Debug, Clone, Deserialize)]
pub struct Delivery {
    pub event: String,
    pub payload: Value,
    /// `X-GitHub-Delivery` GUID, reused as the event id
    #[serde(default)]
    pub delivery: Option<String>,
}

impl Delivery {
    /// Translate into a bus event; `None` for deliveries the bot ignores
    pub fn into_event(self) -> Option<Event> {
        let event = translate(&self.event, &self.payload)?;
        let id = self
            .delivery
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Some(event.with_id(id))
    }
}

/// Translate a webhook payload into a bus event
///
/// `pull_request` deliveries become [`PR_OPENED`] (action `opened`) or
/// [`PR_UPDATED`] (action `synchronize`); `issues` deliveries with action
/// `opened` become [`ISSUE_OPENED`]. Everything else is ignored.
pub fn translate(kind: &str, payload: &Value) -> Option<Event> {
    let action = payload.get("action").and_then(Value::as_str);
    let repo = payload.pointer("/repository/full_name").cloned();

    let (event_type, data) = match (kind, action) {
        ("pull_request", Some(action @ ("opened" | "synchronize"))) => {
            let pr = payload.get("pull_request");
            let field = |key: &str| pr.and_then(|p| p.get(key)).cloned();
            let data = object(json!({
                "repo": repo,
                "number": field("number"),
                "author": pr.and_then(|p| p.pointer("/user/login")).cloned(),
                "title": field("title"),
                "description": field("body"),
                // Changed files need a separate API call
                "files": [],
            }));
            let event_type = if action == "opened" { PR_OPENED } else { PR_UPDATED };
            (event_type, data)
        }
        ("issues", Some("opened")) => {
            let issue = payload.get("issue");
            let field = |key: &str| issue.and_then(|i| i.get(key)).cloned();
            let data = object(json!({
                "repo": repo,
                "number": field("number"),
                "title": field("title"),
                "body": field("body"),
            }));
            (ISSUE_OPENED, data)
        }
        _ => {
            tracing::debug!(kind, action = ?action, "ignoring webhook");
            return None;
        }
    };

    Some(
        Event::new(event_type)
            .with_data(data)
            .with_source(WEBHOOK_SOURCE),
    )
}

fn object(value: Value) -> EventData {
    match value {
        Value::Object(map) => map,
        _ => EventData::new(),
    }
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
