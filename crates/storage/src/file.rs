// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file-per-key state backend

use crate::backend::StateBackend;
use crate::error::StorageError;
use crate::record::{accepts_version, StateRecord};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Directory used when no location is configured
pub const DEFAULT_STATE_DIR: &str = "./.agent_state";

const EXTENSION: &str = "json";

/// Stores each record as `<base_dir>/<safe key>.json`
///
/// Keys are made filesystem-safe by replacing `/` and `\` with `_`. Distinct
/// keys that become the same safe name share a file; that collision is not
/// detected.
///
/// A file that cannot be decoded reads as absent.
///
/// The version check reads the current file and then writes the new one.
/// Writers in other processes can interleave between the two steps, so the
/// check is only reliable within a single writer.
#[derive(Clone, Debug)]
pub struct FileStateBackend {
    base_dir: PathBuf,
}

impl FileStateBackend {
    /// Open a backend at `base_dir`, creating the directory if needed
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file holding `key`
    pub fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", safe_file_stem(key), EXTENSION))
    }

    async fn read_record(path: &Path) -> Result<Option<StateRecord>, StorageError> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable state file");
                Ok(None)
            }
        }
    }

    /// Every `*.json` file directly under the base directory, including the
    /// bare `.json` that holds the empty key
    async fn record_files(&self) -> Result<Vec<PathBuf>, StorageError> {
        let mut files = Vec::new();
        let mut entries = match fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(files),
            Err(e) => return Err(e.into()),
        };

        let suffix = format!(".{}", EXTENSION);
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_record = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.ends_with(&suffix))
                .unwrap_or(false);
            if is_record {
                files.push(path);
            }
        }
        Ok(files)
    }
}

/// Filename stem for a key
pub fn safe_file_stem(key: &str) -> String {
    key.replace(['/', '\\'], "_")
}

#[async_trait]
impl StateBackend for FileStateBackend {
    async fn get(&self, key: &str) -> Result<Option<StateRecord>, StorageError> {
        Self::read_record(&self.file_path(key)).await
    }

    async fn set(&self, record: StateRecord) -> Result<bool, StorageError> {
        let path = self.file_path(&record.key);

        let existing = Self::read_record(&path).await?;
        if !accepts_version(existing.as_ref(), record.version) {
            tracing::debug!(key = %record.key, version = record.version, "version conflict");
            return Ok(false);
        }

        // Write beside the target and rename over it so readers never see a
        // partial record
        let json = serde_json::to_vec_pretty(&record)?;
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &path).await?;

        tracing::trace!(key = %record.key, version = record.version, "state written");
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        match fs::remove_file(self.file_path(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Keys are read from the records themselves, so keys that were
    /// sanitized for the filename are listed as written
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        for path in self.record_files().await? {
            if let Some(record) = Self::read_record(&path).await? {
                if record.key.starts_with(prefix) {
                    keys.push(record.key);
                }
            }
        }
        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    async fn clear(&self) -> Result<usize, StorageError> {
        let mut count = 0;
        for path in self.record_files().await? {
            match fs::remove_file(&path).await {
                Ok(()) => count += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
