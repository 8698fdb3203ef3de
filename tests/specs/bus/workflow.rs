// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Multi-step workflows chained through handler emissions.

use relay_core::{handler_fn, middleware_fn, BoxError, Event, EventBus};
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn handlers_chain_workflow_steps() {
    let bus = EventBus::new();
    let steps = Arc::new(Mutex::new(Vec::new()));

    {
        let bus2 = bus.clone();
        let steps = Arc::clone(&steps);
        bus.on(
            "workflow.step1.complete",
            handler_fn(move |event: Event| {
                let bus = bus2.clone();
                let steps = Arc::clone(&steps);
                async move {
                    steps.lock().unwrap().push("step2".to_string());
                    let input = event.get_str("input").unwrap_or_default();
                    bus.emit(
                        Event::new("workflow.step2.complete")
                            .with_field("result", format!("{}_processed", input)),
                    )
                    .await?;
                    Ok::<(), BoxError>(())
                }
            }),
        );
    }
    {
        let steps = Arc::clone(&steps);
        bus.on(
            "workflow.step2.complete",
            handler_fn(move |event: Event| {
                let steps = Arc::clone(&steps);
                async move {
                    let result = event.get_str("result").unwrap_or_default().to_string();
                    steps.lock().unwrap().push(format!("step3:{}", result));
                    Ok(())
                }
            }),
        );
    }

    bus.emit(Event::new("workflow.step1.complete").with_field("input", "test_data"))
        .await
        .unwrap();

    // emit returns only after nested emissions finish
    assert_eq!(
        *steps.lock().unwrap(),
        vec!["step2".to_string(), "step3:test_data_processed".to_string()]
    );

    let history: Vec<String> = bus
        .get_history(None, 10)
        .iter()
        .map(|e| e.event_type().to_string())
        .collect();
    assert_eq!(
        history,
        vec!["workflow.step1.complete", "workflow.step2.complete"]
    );
}

#[tokio::test]
async fn wildcard_audit_sees_every_workflow_event() {
    let bus = EventBus::new();
    let audit = Arc::new(Mutex::new(Vec::new()));

    {
        let audit = Arc::clone(&audit);
        bus.on(
            "workflow.*.complete",
            handler_fn(move |event: Event| {
                let audit = Arc::clone(&audit);
                async move {
                    audit.lock().unwrap().push(event.event_type().to_string());
                    Ok(())
                }
            }),
        );
    }

    for step in ["step1", "step2", "step3"] {
        bus.emit(Event::new(format!("workflow.{}.complete", step)))
            .await
            .unwrap();
    }
    bus.emit(Event::new("workflow.step1.started")).await.unwrap();

    assert_eq!(audit.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn middleware_enriches_before_handlers_see_events() {
    let bus = EventBus::new();
    let seen = Arc::new(Mutex::new(Vec::new()));

    bus.use_middleware(middleware_fn(|event: Event| async move {
        Ok(event.with_field("tenant", "acme"))
    }));
    {
        let seen = Arc::clone(&seen);
        bus.on(
            "*",
            handler_fn(move |event: Event| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.lock()
                        .unwrap()
                        .push(event.get_str("tenant").map(String::from));
                    Ok(())
                }
            }),
        );
    }

    bus.emit(Event::new("user.signup")).await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![Some("acme".to_string())]);
    // History keeps the event as emitted
    assert!(bus.get_history(None, 1)[0].get("tenant").is_none());
}
