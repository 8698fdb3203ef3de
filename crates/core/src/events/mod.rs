// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events system for loose coupling between agents and external systems
//!
//! This module provides:
//! - `EventBus` - Route events to every handler whose pattern matches
//! - `EventPattern` - Dot-segmented pattern matching with `*` wildcards
//! - `EventHandler` / `Middleware` - Handler and transform capabilities
//! - `EventHistory` - Bounded record of recently emitted events

mod bus;
mod handler;
mod history;
mod subscription;

pub use bus::{BusError, EventBus};
pub use handler::{
    handler_fn, middleware_fn, sync_handler, BoxError, EventHandler, FnHandler, FnMiddleware,
    Handler, Middleware, SharedMiddleware, SyncFnHandler,
};
pub use history::{EventHistory, DEFAULT_HISTORY_LIMIT};
pub use subscription::{EventPattern, HandlerSet, Subscription};

#[cfg(test)]
mod tests;
