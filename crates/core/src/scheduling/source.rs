// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event source lifecycle

use crate::events::EventBus;
use async_trait::async_trait;

/// A component that bridges an external system into an event bus
///
/// Implementations begin emitting on `start` and release their resources on
/// `stop`. `stop` must not return while work started by the source is still
/// running.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// The bus this source emits into
    fn bus(&self) -> &EventBus;

    async fn start(&self);

    async fn stop(&self);

    fn is_running(&self) -> bool;
}
