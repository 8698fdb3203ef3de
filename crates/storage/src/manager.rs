// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! High-level state management

use crate::backend::StateBackend;
use crate::error::StorageError;
use crate::file::{FileStateBackend, DEFAULT_STATE_DIR};
use crate::record::{Metadata, StateRecord, FIRST_VERSION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Typed, versioned access to a state backend
///
/// Nothing is cached: every call reads or writes the backend, so all
/// managers over the same backend observe the same state. Clones share the
/// backend.
#[derive(Clone)]
pub struct StateManager {
    backend: Arc<dyn StateBackend>,
}

impl StateManager {
    pub fn new(backend: impl StateBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn with_backend(backend: Arc<dyn StateBackend>) -> Self {
        Self { backend }
    }

    /// Manager over a file backend in [`DEFAULT_STATE_DIR`]
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::new(FileStateBackend::open(DEFAULT_STATE_DIR)?))
    }

    pub fn backend(&self) -> &Arc<dyn StateBackend> {
        &self.backend
    }

    /// Stored value for `key`, or `default` when absent
    pub async fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, StorageError> {
        Ok(self.get_opt(key).await?.unwrap_or(default))
    }

    /// Stored value for `key`, if any
    pub async fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get(key).await? {
            Some(record) => decode(key, record.value).map(Some),
            None => Ok(None),
        }
    }

    /// Full record including version and metadata
    pub async fn get_state_obj(&self, key: &str) -> Result<Option<StateRecord>, StorageError> {
        self.backend.get(key).await
    }

    /// Write `value` unconditionally, replacing metadata
    ///
    /// The version is taken from the stored record, so this only loses when
    /// another writer lands between that read and the write. Such a lost
    /// write is logged, not reported.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        metadata: Option<Metadata>,
    ) -> Result<(), StorageError> {
        let value = serde_json::to_value(value)?;
        let existing = self.backend.get(key).await?;
        let record = StateRecord::new(key, value)
            .with_version(next_version(existing.as_ref()))
            .with_metadata(metadata.unwrap_or_default());
        let version = record.version;

        if !self.backend.set(record).await? {
            tracing::warn!(key, version, "state write lost to a concurrent writer");
        }
        Ok(())
    }

    /// Write `value` only if the stored version equals `version`
    ///
    /// With `version: None` this behaves like [`set`](Self::set) but keeps
    /// the existing metadata. Returns false on a version conflict, including
    /// when a version is given for a key that does not exist.
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        version: Option<u64>,
    ) -> Result<bool, StorageError> {
        let value = serde_json::to_value(value)?;
        let existing = self.backend.get(key).await?;

        if let Some(expected) = version {
            match &existing {
                Some(record) if record.version == expected => {}
                _ => {
                    tracing::debug!(key, expected, "update rejected: version mismatch");
                    return Ok(false);
                }
            }
        }

        let record = StateRecord::new(key, value)
            .with_version(next_version(existing.as_ref()))
            .with_metadata(existing.map(|r| r.metadata).unwrap_or_default());
        self.backend.set(record).await
    }

    pub async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        self.backend.delete(key).await
    }

    pub async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.backend.get(key).await?.is_some())
    }

    /// Add `amount` to the integer at `key` (0 when absent) and return the sum
    ///
    /// This is a read followed by a write: concurrent incrementers of one
    /// key can overwrite each other. A sum outside the `i64` range fails with
    /// [`StorageError::Overflow`] and leaves the stored value untouched.
    pub async fn increment(&self, key: &str, amount: i64) -> Result<i64, StorageError> {
        let current: i64 = self.get(key, 0).await?;
        let new_value = current
            .checked_add(amount)
            .ok_or_else(|| StorageError::Overflow {
                key: key.to_string(),
                amount,
            })?;
        self.set(key, &new_value, None).await?;
        Ok(new_value)
    }

    /// Keys starting with `prefix`
    pub async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        self.backend.list_keys(prefix).await
    }

    /// Remove all state; returns how many records were removed
    pub async fn clear(&self) -> Result<usize, StorageError> {
        self.backend.clear().await
    }
}

fn next_version(existing: Option<&StateRecord>) -> u64 {
    existing.map(StateRecord::next_version).unwrap_or(FIRST_VERSION)
}

fn decode<T: DeserializeOwned>(key: &str, value: Value) -> Result<T, StorageError> {
    serde_json::from_value(value).map_err(|source| StorageError::Decode {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
