// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event pattern matching and handler registration

use super::handler::Handler;
use std::sync::Arc;

/// Pattern for matching event types
///
/// Supports:
///   - Exact: "github.pr.created"
///   - Single-segment wildcard: "github.pr.*" matches "github.pr.created",
///     "github.*.created" matches "github.issue.created"
///   - Global: "*" alone matches every event type
///
/// There is no multi-level wildcard: apart from "*", a pattern only matches
/// event types with the same number of segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventPattern(String);

impl EventPattern {
    /// Matches any single segment, or any event type when used alone
    pub const WILDCARD: &'static str = "*";

    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// Check if this pattern matches an event type
    pub fn matches(&self, event_type: &str) -> bool {
        if self.0 == Self::WILDCARD {
            return true;
        }

        let mut pattern_parts = self.0.split('.');
        let mut event_parts = event_type.split('.');

        loop {
            match (pattern_parts.next(), event_parts.next()) {
                (None, None) => return true,
                (Some(p), Some(e)) if p == Self::WILDCARD || p == e => continue,
                _ => return false,
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventPattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl std::fmt::Display for EventPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handlers registered under one pattern
///
/// Membership is by handler identity: inserting a clone of an `Arc` that is
/// already present is a no-op.
#[derive(Clone, Default)]
pub struct HandlerSet {
    handlers: Vec<Handler>,
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler; returns false if it was already a member
    pub fn insert(&mut self, handler: Handler) -> bool {
        if self.contains(&handler) {
            return false;
        }
        self.handlers.push(handler);
        true
    }

    /// Remove a handler; returns whether it was a member
    pub fn remove(&mut self, handler: &Handler) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|h| !Arc::ptr_eq(h, handler));
        self.handlers.len() != before
    }

    pub fn contains(&self, handler: &Handler) -> bool {
        self.handlers.iter().any(|h| Arc::ptr_eq(h, handler))
    }

    /// Merge another set into this one, keeping identity semantics
    pub fn extend(&mut self, other: &HandlerSet) {
        for handler in &other.handlers {
            self.insert(Arc::clone(handler));
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handler> {
        self.handlers.iter()
    }
}

impl IntoIterator for HandlerSet {
    type Item = Handler;
    type IntoIter = std::vec::IntoIter<Handler>;

    fn into_iter(self) -> Self::IntoIter {
        self.handlers.into_iter()
    }
}

/// A pattern and the handlers subscribed to it
#[derive(Clone)]
pub struct Subscription {
    pub pattern: EventPattern,
    pub handlers: HandlerSet,
}

impl Subscription {
    pub fn new(pattern: EventPattern) -> Self {
        Self {
            pattern,
            handlers: HandlerSet::new(),
        }
    }

    /// Check if this subscription's pattern matches the event type
    pub fn matches(&self, event_type: &str) -> bool {
        self.pattern.matches(event_type)
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
