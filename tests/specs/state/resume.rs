// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Long-running workflows resumed from persisted results.

use relay_storage::{FileStateBackend, StateManager, Stateful};
use serde_json::{json, Value};
use tempfile::TempDir;

async fn advance(stateful: &Stateful, user: &str) -> Value {
    stateful
        .call("long_workflow", &user, |previous: Option<Value>| async move {
            let step = previous
                .as_ref()
                .and_then(|p| p["step"].as_u64())
                .unwrap_or(0);
            json!({"step": step + 1, "data": format!("completed step {}", step + 1)})
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn workflow_resumes_across_restarts() {
    let tmp = TempDir::new().unwrap();

    let first = Stateful::new(
        StateManager::new(FileStateBackend::open(tmp.path()).unwrap()),
        "workflow",
    );
    assert_eq!(advance(&first, "user123").await["step"], 1);
    assert_eq!(advance(&first, "user123").await["step"], 2);
    drop(first);

    // A fresh process picks up where the last one stopped
    let second = Stateful::new(
        StateManager::new(FileStateBackend::open(tmp.path()).unwrap()),
        "workflow",
    );
    let result = advance(&second, "user123").await;
    assert_eq!(result["step"], 3);
    assert_eq!(result["data"], "completed step 3");

    let keys = second.manager().list("workflow:long_workflow:").await.unwrap();
    assert_eq!(keys.len(), 1);
}
