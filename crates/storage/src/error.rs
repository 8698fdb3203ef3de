// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage error types

use thiserror::Error;

/// Failures reaching or encoding state
///
/// Version conflicts and missing keys are not errors: they are reported as
/// `Ok(false)` and `Ok(None)` by the operations that encounter them.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("state {key} does not decode as the requested type: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("incrementing state {key} by {amount} overflows")]
    Overflow { key: String, amount: i64 },
}
