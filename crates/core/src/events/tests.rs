// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Integration tests for the events system

use super::*;
use crate::event::Event;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Handler implemented as a type rather than a closure
struct AuditHandler {
    entries: Mutex<Vec<String>>,
}

#[async_trait]
impl EventHandler for AuditHandler {
    fn name(&self) -> &str {
        "audit"
    }

    async fn handle(&self, event: &Event) -> Result<(), BoxError> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(format!("{}:{}", event.source(), event.event_type()));
        Ok(())
    }
}

/// Middleware that stamps the emitting source into the payload
struct SourceStamp;

#[async_trait]
impl Middleware for SourceStamp {
    async fn process(&self, event: Event) -> Result<Event, BoxError> {
        let source = event.source().to_string();
        Ok(event.with_field("stamped_by", source))
    }
}

#[tokio::test]
async fn trait_handlers_and_middleware() {
    let bus = EventBus::new();
    let audit = Arc::new(AuditHandler {
        entries: Mutex::new(Vec::new()),
    });
    let handler: Handler = audit.clone();
    bus.on("*", handler);
    bus.use_middleware(Arc::new(SourceStamp));

    bus.emit(Event::new("github.pr.opened").with_source("github-webhook"))
        .await
        .unwrap();
    bus.emit(Event::new("timer.tick").with_source("timer"))
        .await
        .unwrap();

    assert_eq!(
        *audit.entries.lock().unwrap(),
        vec!["github-webhook:github.pr.opened", "timer:timer.tick"]
    );
    assert_eq!(audit.name(), "audit");
}

#[tokio::test]
async fn routing_across_patterns() {
    let bus = EventBus::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    for pattern in ["github.pr.*", "github.*.opened", "github.issue.opened", "*"] {
        let sink = Arc::clone(&seen);
        let label = pattern.to_string();
        bus.on(
            pattern,
            sync_handler(move |event| {
                sink.lock()
                    .unwrap()
                    .push(format!("{} <- {}", label, event.event_type()));
                Ok(())
            }),
        );
    }

    bus.emit(Event::new("github.issue.opened")).await.unwrap();

    let mut seen = seen.lock().unwrap().clone();
    seen.sort();
    assert_eq!(
        seen,
        vec![
            "* <- github.issue.opened",
            "github.*.opened <- github.issue.opened",
            "github.issue.opened <- github.issue.opened",
        ]
    );
}
