// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State backend contract

use crate::error::StorageError;
use crate::record::StateRecord;
use async_trait::async_trait;

/// Persistence for state records
///
/// Backends own the stored representation. Every write is version checked:
/// `set` must return `Ok(false)` without writing unless the record's version
/// is exactly one more than the stored version (0 when absent). See
/// [`accepts_version`](crate::record::accepts_version).
#[async_trait]
pub trait StateBackend: Send + Sync {
    /// Read a record; `None` when absent
    async fn get(&self, key: &str) -> Result<Option<StateRecord>, StorageError>;

    /// Write a record if its version is next; returns whether it was written
    async fn set(&self, record: StateRecord) -> Result<bool, StorageError>;

    /// Remove a record; returns whether one existed
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// Keys starting with `prefix`, sorted; an empty prefix lists everything
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Remove every record; returns how many were removed
    async fn clear(&self) -> Result<usize, StorageError>;
}
