// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic event emission

use super::source::EventSource;
use crate::event::{Event, EventData};
use crate::events::EventBus;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Source label on every timer event
pub const TIMER_SOURCE: &str = "timer";

/// Shortest interval a schedule will sleep for
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

struct Schedule {
    interval: Duration,
    data: EventData,
    task: Option<JoinHandle<()>>,
}

#[derive(Default)]
struct TimerState {
    schedules: HashMap<String, Schedule>,
    runtime: Option<Handle>,
}

/// Emits events on a fixed interval
///
/// Each schedule is keyed by the event type it emits. Schedules added before
/// `start` begin when the source starts; schedules added while running begin
/// immediately. Every tick sleeps first, then emits, so the first event
/// arrives one interval after the schedule begins.
pub struct TimerSource {
    bus: EventBus,
    running: Arc<AtomicBool>,
    state: Mutex<TimerState>,
}

impl TimerSource {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            running: Arc::new(AtomicBool::new(false)),
            state: Mutex::new(TimerState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TimerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Schedule `event_type` to be emitted every `interval` with `data`
    ///
    /// Replaces any existing schedule for the same event type. Intervals
    /// shorter than [`MIN_INTERVAL`] are raised to it.
    pub fn schedule(&self, event_type: impl Into<String>, interval: Duration, data: EventData) {
        let event_type = event_type.into();
        let interval = interval.max(MIN_INTERVAL);
        let mut state = self.lock();

        let task = match (&state.runtime, self.is_running()) {
            (Some(runtime), true) => Some(self.spawn(runtime, &event_type, interval, &data)),
            _ => None,
        };

        let previous = state.schedules.insert(
            event_type.clone(),
            Schedule {
                interval,
                data,
                task,
            },
        );
        if let Some(task) = previous.and_then(|s| s.task) {
            task.abort();
        }

        tracing::debug!(
            event_type = %event_type,
            interval_ms = interval.as_millis() as u64,
            "timer scheduled"
        );
    }

    /// Cancel one schedule; returns whether it existed
    ///
    /// Other schedules keep running.
    pub fn cancel(&self, event_type: &str) -> bool {
        let Some(schedule) = self.lock().schedules.remove(event_type) else {
            return false;
        };
        if let Some(task) = schedule.task {
            task.abort();
        }
        tracing::debug!(event_type, "timer cancelled");
        true
    }

    /// Event types with an active or pending schedule
    pub fn scheduled(&self) -> Vec<String> {
        let mut types: Vec<String> = self.lock().schedules.keys().cloned().collect();
        types.sort();
        types
    }

    fn spawn(
        &self,
        runtime: &Handle,
        event_type: &str,
        interval: Duration,
        data: &EventData,
    ) -> JoinHandle<()> {
        let bus = self.bus.clone();
        let running = Arc::clone(&self.running);
        let event_type = event_type.to_string();
        let data = data.clone();

        runtime.spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                if !running.load(Ordering::SeqCst) {
                    break;
                }
                let event = Event::new(event_type.as_str())
                    .with_data(data.clone())
                    .with_source(TIMER_SOURCE);
                if let Err(e) = bus.emit(event).await {
                    tracing::warn!(event_type = %event_type, error = %e, "timer emission rejected");
                }
            }
        })
    }
}

#[async_trait]
impl EventSource for TimerSource {
    fn bus(&self) -> &EventBus {
        &self.bus
    }

    async fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
        let runtime = Handle::current();

        let count = {
            let mut state = self.lock();
            let pending: Vec<(String, Duration, EventData)> = state
                .schedules
                .iter()
                .filter(|(_, s)| s.task.is_none())
                .map(|(t, s)| (t.clone(), s.interval, s.data.clone()))
                .collect();
            for (event_type, interval, data) in pending {
                let task = self.spawn(&runtime, &event_type, interval, &data);
                if let Some(schedule) = state.schedules.get_mut(&event_type) {
                    schedule.task = Some(task);
                }
            }
            state.runtime = Some(runtime);
            state.schedules.len()
        };

        tracing::info!(schedules = count, "timer source started");
    }

    /// Cancel every schedule and wait for their tasks to finish
    async fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);

        let tasks: Vec<JoinHandle<()>> = {
            let mut state = self.lock();
            state.runtime = None;
            state
                .schedules
                .drain()
                .filter_map(|(_, s)| s.task)
                .collect()
        };

        for task in &tasks {
            task.abort();
        }
        for task in tasks {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::warn!(error = %e, "timer task ended abnormally");
                }
            }
        }

        tracing::info!("timer source stopped");
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for TimerSource {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(|e| e.into_inner());
        for schedule in state.schedules.values() {
            if let Some(task) = &schedule.task {
                task.abort();
            }
        }
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
