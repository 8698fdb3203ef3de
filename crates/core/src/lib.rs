// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relay-core: in-process event routing for connected agents
//!
//! This crate provides:
//! - `Event` values with dot-segmented types and JSON payloads
//! - `EventBus` fan-out to pattern-matched handlers with middleware and history
//! - `TimerSource` and the `EventSource` lifecycle for producers

pub mod config;
pub mod event;
pub mod events;
pub mod id;
pub mod scheduling;

// Re-exports
pub use config::BusConfig;
pub use event::{Event, EventData, UNKNOWN_SOURCE};
pub use events::{
    handler_fn, middleware_fn, sync_handler, BoxError, BusError, EventBus, EventHandler,
    EventPattern, Handler, Middleware, SharedMiddleware,
};
pub use id::{IdGen, MonotonicIdGen};
pub use scheduling::{EventSource, TimerSource};
