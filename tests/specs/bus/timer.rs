// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer-driven emissions feeding stateful handlers.

use relay_core::{handler_fn, BoxError, EventBus, EventData, EventSource, TimerSource};
use relay_storage::{MemoryStateBackend, StateManager};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn heartbeat_ticks_update_counter() {
    let bus = EventBus::new();
    let state = StateManager::new(MemoryStateBackend::new());

    {
        let state = state.clone();
        bus.on(
            "system.heartbeat",
            handler_fn(move |_| {
                let state = state.clone();
                async move {
                    state.increment("heartbeats", 1).await?;
                    Ok::<(), BoxError>(())
                }
            }),
        );
    }

    let timer = TimerSource::new(bus.clone());
    timer.schedule("system.heartbeat", Duration::from_millis(100), EventData::new());
    timer.start().await;

    tokio::time::sleep(Duration::from_millis(350)).await;
    timer.stop().await;

    let beats: i64 = state.get("heartbeats", 0).await.unwrap();
    assert!((2..=3).contains(&beats), "got {beats} heartbeats");

    // Nothing fires after stop
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(state.get("heartbeats", 0i64).await.unwrap(), beats);
    assert!(bus
        .get_history(Some("system.heartbeat"), 10)
        .iter()
        .all(|e| e.source() == "timer"));
}
