// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory state backend

use crate::backend::StateBackend;
use crate::error::StorageError;
use crate::record::{accepts_version, StateRecord};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Process-local backend for tests and short-lived agents
///
/// The version check and the write happen under one lock, so concurrent
/// writers to the same key are serialized.
#[derive(Default)]
pub struct MemoryStateBackend {
    records: Mutex<BTreeMap<String, StateRecord>>,
}

impl MemoryStateBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, StateRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[async_trait]
impl StateBackend for MemoryStateBackend {
    async fn get(&self, key: &str) -> Result<Option<StateRecord>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, record: StateRecord) -> Result<bool, StorageError> {
        let mut records = self.lock();
        if !accepts_version(records.get(&record.key), record.version) {
            tracing::debug!(key = %record.key, version = record.version, "version conflict");
            return Ok(false);
        }
        records.insert(record.key.clone(), record);
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.lock().remove(key).is_some())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .lock()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn clear(&self) -> Result<usize, StorageError> {
        let mut records = self.lock();
        let count = records.len();
        records.clear();
        Ok(count)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
