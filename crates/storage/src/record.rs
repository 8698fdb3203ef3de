// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Versioned state records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Version carried by the first write of a key
pub const FIRST_VERSION: u64 = 1;

/// Auxiliary, caller-defined record metadata
pub type Metadata = Map<String, Value>;

/// A persisted value with its optimistic-concurrency version
///
/// Serialized as `{"key", "value", "version", "metadata"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub key: String,
    pub value: Value,
    #[serde(default = "first_version")]
    pub version: u64,
    #[serde(default)]
    pub metadata: Metadata,
}

fn first_version() -> u64 {
    FIRST_VERSION
}

impl StateRecord {
    /// A first-write record (version 1, no metadata)
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
            version: FIRST_VERSION,
            metadata: Metadata::new(),
        }
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// The version the next successful write of this key must carry
    pub fn next_version(&self) -> u64 {
        self.version + 1
    }
}

/// Whether a write proposing `proposed` may replace `stored`
///
/// A write is accepted only when it is exactly one version ahead of what is
/// stored; an absent record counts as version 0.
pub fn accepts_version(stored: Option<&StateRecord>, proposed: u64) -> bool {
    let current = stored.map(|r| r.version).unwrap_or(0);
    proposed == current + 1
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
