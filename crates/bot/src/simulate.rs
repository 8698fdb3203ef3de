// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canned GitHub activity for running the bot without webhooks

use crate::webhook::{ISSUE_OPENED, PR_OPENED, PR_UPDATED};
use relay_core::{BusError, Event, EventBus};
use serde_json::json;

pub const SIMULATION_SOURCE: &str = "simulation";

/// The simulated events, in emission order
pub fn simulated_events() -> Vec<Event> {
    vec![
        Event::new(PR_OPENED)
            .with_field("repo", "myorg/myproject")
            .with_field("number", 42)
            .with_field("author", "developer1")
            .with_field("title", "Add user authentication feature")
            .with_field("description", "This PR adds OAuth2 authentication...")
            .with_field("files", json!(["auth.py", "models.py", "tests/test_auth.py"]))
            .with_source(SIMULATION_SOURCE),
        Event::new(ISSUE_OPENED)
            .with_field("repo", "myorg/myproject")
            .with_field("number", 123)
            .with_field("title", "Bug: Login fails with 500 error")
            .with_field(
                "body",
                "When I try to login with invalid credentials, the server crashes.",
            )
            .with_source(SIMULATION_SOURCE),
        Event::new(PR_UPDATED)
            .with_field("repo", "myorg/myproject")
            .with_field("number", 42)
            .with_field(
                "files",
                json!(["auth.py", "models.py", "tests/test_auth.py", "config.py"]),
            )
            .with_source(SIMULATION_SOURCE),
    ]
}

/// Emit the simulated events one after another
///
/// Each emission completes, including the reviews it triggers, before the
/// next one starts.
pub async fn simulate(bus: &EventBus) -> Result<(), BusError> {
    for event in simulated_events() {
        tracing::info!(event_type = event.event_type(), "simulating");
        bus.emit(event).await?;
    }
    Ok(())
}
