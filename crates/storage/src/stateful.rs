// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resumable computations backed by a [`StateManager`]

use crate::error::StorageError;
use crate::manager::StateManager;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::future::Future;

/// Persists the result of named computations between calls
///
/// Each call is keyed by `"{prefix}:{name}:{args-hash}"`. The previous
/// result for the same key is handed to the computation, and whatever it
/// returns is stored for the next call.
#[derive(Clone)]
pub struct Stateful {
    manager: StateManager,
    key_prefix: String,
}

impl Stateful {
    pub fn new(manager: StateManager, key_prefix: impl Into<String>) -> Self {
        Self {
            manager,
            key_prefix: key_prefix.into(),
        }
    }

    pub fn manager(&self) -> &StateManager {
        &self.manager
    }

    /// State key for a call of `name` with `args`
    pub fn key_for<A: Serialize + ?Sized>(
        &self,
        name: &str,
        args: &A,
    ) -> Result<String, StorageError> {
        let encoded = serde_json::to_vec(args)?;
        Ok(format!("{}:{}:{}", self.key_prefix, name, args_hash(&encoded)))
    }

    /// Run `f` with the previously stored result and store what it returns
    ///
    /// A stored value that no longer decodes as `T` is treated as absent.
    pub async fn call<A, T, F, Fut>(&self, name: &str, args: &A, f: F) -> Result<T, StorageError>
    where
        A: Serialize + ?Sized,
        T: Serialize + DeserializeOwned,
        F: FnOnce(Option<T>) -> Fut,
        Fut: Future<Output = T>,
    {
        let key = self.key_for(name, args)?;
        let previous = match self.manager.get_opt::<T>(&key).await {
            Ok(previous) => previous,
            Err(StorageError::Decode { source, .. }) => {
                tracing::warn!(key, error = %source, "discarding undecodable stateful result");
                None
            }
            Err(e) => return Err(e),
        };

        let result = f(previous).await;
        self.manager.set(&key, &result, None).await?;
        Ok(result)
    }
}

fn args_hash(encoded: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(encoded);
    let digest = hasher.finalize();
    hex_encode(&digest[..8])
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
#[path = "stateful_tests.rs"]
mod tests;
