// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event handlers and middleware
//!
//! Handlers are a single async capability. Synchronous work is wrapped with
//! [`sync_handler`], async closures with [`handler_fn`].

use crate::event::Event;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Error type returned by handlers and middleware
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared handler reference; identity is the allocation
pub type Handler = Arc<dyn EventHandler>;

/// Shared middleware reference
pub type SharedMiddleware = Arc<dyn Middleware>;

/// Reacts to events delivered by the bus
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Name used in log fields
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn handle(&self, event: &Event) -> Result<(), BoxError>;
}

/// Transforms events before they reach handlers
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn process(&self, event: Event) -> Result<Event, BoxError>;
}

/// Handler backed by an async closure
pub struct FnHandler<F> {
    name: &'static str,
    f: F,
}

#[async_trait]
impl<F, Fut> EventHandler for FnHandler<F>
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    fn name(&self) -> &str {
        self.name
    }

    async fn handle(&self, event: &Event) -> Result<(), BoxError> {
        (self.f)(event.clone()).await
    }
}

/// Handler backed by a synchronous closure
pub struct SyncFnHandler<F> {
    name: &'static str,
    f: F,
}

#[async_trait]
impl<F> EventHandler for SyncFnHandler<F>
where
    F: Fn(&Event) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        self.name
    }

    async fn handle(&self, event: &Event) -> Result<(), BoxError> {
        (self.f)(event)
    }
}

/// Middleware backed by an async closure
pub struct FnMiddleware<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> Middleware for FnMiddleware<F>
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Event, BoxError>> + Send + 'static,
{
    async fn process(&self, event: Event) -> Result<Event, BoxError> {
        (self.f)(event).await
    }
}

/// Wrap an async closure as a handler
pub fn handler_fn<F, Fut>(f: F) -> Handler
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    Arc::new(FnHandler {
        name: std::any::type_name::<F>(),
        f,
    })
}

/// Wrap a synchronous closure as a handler
pub fn sync_handler<F>(f: F) -> Handler
where
    F: Fn(&Event) -> Result<(), BoxError> + Send + Sync + 'static,
{
    Arc::new(SyncFnHandler {
        name: std::any::type_name::<F>(),
        f,
    })
}

/// Wrap an async closure as middleware
pub fn middleware_fn<F, Fut>(f: F) -> SharedMiddleware
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Event, BoxError>> + Send + 'static,
{
    Arc::new(FnMiddleware { f })
}
