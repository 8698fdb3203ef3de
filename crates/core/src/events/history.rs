// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded history of emitted events

use crate::event::Event;
use std::collections::VecDeque;

/// Default number of events kept by a bus
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Insertion-ordered ring of the most recent events
///
/// Once `capacity` is exceeded the oldest event is evicted.
#[derive(Debug, Clone)]
pub struct EventHistory {
    events: VecDeque<Event>,
    capacity: usize,
}

impl EventHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_LIMIT)),
            capacity,
        }
    }

    /// Record an event, evicting the oldest entries beyond capacity
    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
        while self.events.len() > self.capacity {
            self.events.pop_front();
        }
    }

    /// The most recent `limit` events, oldest first
    ///
    /// With `event_type`, only events whose type is exactly equal are
    /// considered; patterns are not expanded here.
    pub fn recent(&self, event_type: Option<&str>, limit: usize) -> Vec<Event> {
        let mut selected: Vec<Event> = self
            .events
            .iter()
            .rev()
            .filter(|e| event_type.map_or(true, |t| e.event_type() == t))
            .take(limit)
            .cloned()
            .collect();
        selected.reverse();
        selected
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
