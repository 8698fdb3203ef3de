// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handlers persisting state in response to events.

use relay_core::{handler_fn, BoxError, Event, EventBus};
use relay_storage::{FileStateBackend, StateManager};
use serde_json::json;
use tempfile::TempDir;

fn track_actions(bus: &EventBus, state: &StateManager) {
    let state = state.clone();
    bus.on(
        "user.action",
        handler_fn(move |event: Event| {
            let state = state.clone();
            async move {
                let user_id = event.get_str("user_id").unwrap_or("anonymous");
                let action = event.get("action").cloned().unwrap_or_default();
                let key = format!("user:{}", user_id);

                let mut current = state.get(&key, json!({"actions": []})).await?;
                if let Some(actions) = current["actions"].as_array_mut() {
                    actions.push(action);
                }
                state.set(&key, &current, None).await?;
                Ok::<(), BoxError>(())
            }
        }),
    );
}

#[tokio::test]
async fn user_actions_accumulate_in_state() {
    let tmp = TempDir::new().unwrap();
    let bus = EventBus::new();
    let state = StateManager::new(FileStateBackend::open(tmp.path()).unwrap());
    track_actions(&bus, &state);

    for action in ["click", "scroll"] {
        bus.emit(
            Event::new("user.action")
                .with_field("user_id", "user123")
                .with_field("action", action),
        )
        .await
        .unwrap();
    }

    let user: serde_json::Value = state.get("user:user123", json!(null)).await.unwrap();
    assert_eq!(user["actions"], json!(["click", "scroll"]));

    let record = state.get_state_obj("user:user123").await.unwrap().unwrap();
    assert_eq!(record.version, 2);
}

#[tokio::test]
async fn state_survives_new_manager_over_same_directory() {
    let tmp = TempDir::new().unwrap();
    {
        let bus = EventBus::new();
        let state = StateManager::new(FileStateBackend::open(tmp.path()).unwrap());
        track_actions(&bus, &state);
        bus.emit(
            Event::new("user.action")
                .with_field("user_id", "user123")
                .with_field("action", "login"),
        )
        .await
        .unwrap();
    }

    let reopened = StateManager::new(FileStateBackend::open(tmp.path()).unwrap());
    assert_eq!(reopened.list("user:").await.unwrap(), vec!["user:user123"]);
    let user: serde_json::Value = reopened.get("user:user123", json!(null)).await.unwrap();
    assert_eq!(user["actions"], json!(["login"]));
}

#[tokio::test]
async fn stale_writer_loses_version_race() {
    let tmp = TempDir::new().unwrap();
    let state = StateManager::new(FileStateBackend::open(tmp.path()).unwrap());

    state.set("doc", &json!({"rev": "a"}), None).await.unwrap();
    let seen = state.get_state_obj("doc").await.unwrap().unwrap().version;

    // Another writer lands first
    assert!(state
        .update("doc", &json!({"rev": "b"}), Some(seen))
        .await
        .unwrap());
    // The stale writer is rejected and the winner's value stays
    assert!(!state
        .update("doc", &json!({"rev": "c"}), Some(seen))
        .await
        .unwrap());

    let doc: serde_json::Value = state.get("doc", json!(null)).await.unwrap();
    assert_eq!(doc["rev"], "b");
}
