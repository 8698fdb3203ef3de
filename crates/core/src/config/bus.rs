// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus configuration

use crate::events::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};

/// Tunables for an [`EventBus`](crate::events::EventBus)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Number of emitted events kept in history
    pub history_limit: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}
