// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus for routing events to handlers

use super::handler::{BoxError, Handler, SharedMiddleware};
use super::history::EventHistory;
use super::subscription::{EventPattern, HandlerSet, Subscription};
use crate::config::BusConfig;
use crate::event::Event;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::task::JoinSet;

/// Errors surfaced to the emitter
///
/// Handler failures never appear here; they are logged per handler.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("middleware {index} failed on {event_type}: {source}")]
    Middleware {
        index: usize,
        event_type: String,
        #[source]
        source: BoxError,
    },
}

struct BusState {
    subscriptions: HashMap<String, Subscription>,
    middleware: Vec<SharedMiddleware>,
    history: EventHistory,
}

/// The event bus routes events to every handler whose pattern matches
///
/// Clones share registrations, middleware and history.
pub struct EventBus {
    state: Arc<Mutex<BusState>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_config(&BusConfig::default())
    }

    pub fn with_config(config: &BusConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(BusState {
                subscriptions: HashMap::new(),
                middleware: Vec::new(),
                history: EventHistory::new(config.history_limit),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BusState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a handler for events matching `pattern`
    ///
    /// Registering the same handler twice under one pattern is a no-op;
    /// returns whether the handler was newly added.
    pub fn on(&self, pattern: impl Into<String>, handler: Handler) -> bool {
        let pattern = pattern.into();
        let mut state = self.lock();
        let subscription = state
            .subscriptions
            .entry(pattern.clone())
            .or_insert_with(|| Subscription::new(EventPattern::new(pattern)));
        subscription.handlers.insert(handler)
    }

    /// Unregister a handler
    ///
    /// Returns whether `pattern` has ever been registered, even when the
    /// handler itself was not a member.
    pub fn off(&self, pattern: &str, handler: &Handler) -> bool {
        let mut state = self.lock();
        match state.subscriptions.get_mut(pattern) {
            Some(subscription) => {
                subscription.handlers.remove(handler);
                true
            }
            None => false,
        }
    }

    /// Append middleware; runs after everything registered before it
    pub fn use_middleware(&self, middleware: SharedMiddleware) {
        self.lock().middleware.push(middleware);
    }

    /// Emit an event to all matching handlers
    ///
    /// The event is recorded in history first, then passed through the
    /// middleware chain. Matching handlers run concurrently and this returns
    /// once all of them have finished. A failing or panicking handler is
    /// logged and does not affect the others. A failing middleware aborts the
    /// emission before any handler runs.
    pub async fn emit(&self, event: Event) -> Result<(), BusError> {
        let middleware = {
            let mut state = self.lock();
            state.history.push(event.clone());
            state.middleware.clone()
        };

        let mut event = event;
        for (index, mw) in middleware.iter().enumerate() {
            let event_type = event.event_type().to_string();
            event = mw
                .process(event)
                .await
                .map_err(|source| BusError::Middleware {
                    index,
                    event_type,
                    source,
                })?;
        }

        let handlers = self.matching_handlers(event.event_type());
        if handlers.is_empty() {
            tracing::trace!(event_type = event.event_type(), "no handlers");
            return Ok(());
        }

        tracing::debug!(
            event_type = event.event_type(),
            event_id = event.id(),
            handlers = handlers.len(),
            "dispatching"
        );

        let event = Arc::new(event);
        let mut tasks = JoinSet::new();
        for handler in handlers {
            let event = Arc::clone(&event);
            tasks.spawn(async move {
                let result = handler.handle(&event).await;
                (handler, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(()))) => {}
                Ok((handler, Err(e))) => tracing::error!(
                    event_type = event.event_type(),
                    event_id = event.id(),
                    handler = handler.name(),
                    error = %e,
                    "event handler failed"
                ),
                Err(e) => tracing::error!(
                    event_type = event.event_type(),
                    event_id = event.id(),
                    error = %e,
                    "event handler panicked"
                ),
            }
        }

        Ok(())
    }

    /// Union of the handler sets of every pattern matching `event_type`
    fn matching_handlers(&self, event_type: &str) -> HandlerSet {
        let state = self.lock();
        let mut matched = HandlerSet::new();
        for subscription in state.subscriptions.values() {
            if subscription.matches(event_type) {
                matched.extend(&subscription.handlers);
            }
        }
        matched
    }

    /// The most recent `limit` events, optionally filtered by exact type
    pub fn get_history(&self, event_type: Option<&str>, limit: usize) -> Vec<Event> {
        self.lock().history.recent(event_type, limit)
    }

    pub fn clear_history(&self) {
        self.lock().history.clear();
    }

    /// Handlers registered under the exact pattern `pattern`, or across all
    /// patterns when `None`
    pub fn handler_count(&self, pattern: Option<&str>) -> usize {
        let state = self.lock();
        match pattern {
            Some(p) => state
                .subscriptions
                .get(p)
                .map(|s| s.handlers.len())
                .unwrap_or(0),
            None => state.subscriptions.values().map(|s| s.handlers.len()).sum(),
        }
    }

    /// Registered patterns
    pub fn patterns(&self) -> Vec<EventPattern> {
        self.lock()
            .subscriptions
            .values()
            .map(|s| s.pattern.clone())
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
