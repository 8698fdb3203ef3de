// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event values routed by the bus

use crate::id::{IdGen, MonotonicIdGen};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event payload: string keys to arbitrary JSON values
pub type EventData = Map<String, Value>;

/// Source label used when a producer does not name itself
pub const UNKNOWN_SOURCE: &str = "unknown";

/// An event in the system
///
/// Events are immutable once shared: handlers receive `&Event`, and the
/// `with_*` builders consume the value they modify. The payload is owned by
/// the event, so later changes to the map a producer started from never reach
/// an emitted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Dot-segmented type, e.g. `github.pr.created`
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: EventData,
    #[serde(default = "default_source")]
    source: String,
    #[serde(default = "Utc::now")]
    timestamp: DateTime<Utc>,
    #[serde(default = "next_event_id")]
    id: String,
}

fn default_source() -> String {
    UNKNOWN_SOURCE.to_string()
}

fn next_event_id() -> String {
    MonotonicIdGen.next()
}

impl Event {
    /// Create an event with empty data, stamped now
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            data: EventData::new(),
            source: default_source(),
            timestamp: Utc::now(),
            id: next_event_id(),
        }
    }

    /// Replace the payload
    pub fn with_data(mut self, data: EventData) -> Self {
        self.data = data;
        self
    }

    /// Set a single payload field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Re-type the event, keeping payload, source, timestamp and id
    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn data(&self) -> &EventData {
        &self.data
    }

    /// Look up a payload field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Look up a payload field as a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
