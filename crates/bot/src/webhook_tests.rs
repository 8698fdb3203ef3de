// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn pr_payload(action: &str) -> Value {
    json!({
        "action": action,
        "repository": {"full_name": "myorg/myproject"},
        "pull_request": {
            "number": 42,
            "user": {"login": "developer1"},
            "title": "Add user authentication feature",
            "body": "This PR adds OAuth2 authentication...",
        },
    })
}

#[test]
fn pr_opened() {
    let event = translate("pull_request", &pr_payload("opened")).unwrap();

    assert_eq!(event.event_type(), PR_OPENED);
    assert_eq!(event.source(), WEBHOOK_SOURCE);
    assert_eq!(event.get_str("repo"), Some("myorg/myproject"));
    assert_eq!(event.get("number"), Some(&json!(42)));
    assert_eq!(event.get_str("author"), Some("developer1"));
    assert_eq!(event.get_str("title"), Some("Add user authentication feature"));
    assert_eq!(
        event.get_str("description"),
        Some("This PR adds OAuth2 authentication...")
    );
    assert_eq!(event.get("files"), Some(&json!([])));
}

#[test]
fn pr_synchronize_is_update() {
    let event = translate("pull_request", &pr_payload("synchronize")).unwrap();
    assert_eq!(event.event_type(), PR_UPDATED);
    assert_eq!(event.get("number"), Some(&json!(42)));
}

#[test]
fn issue_opened() {
    let payload = json!({
        "action": "opened",
        "repository": {"full_name": "myorg/myproject"},
        "issue": {
            "number": 123,
            "title": "Bug: Login fails with 500 error",
            "body": "The server crashes.",
        },
    });
    let event = translate("issues", &payload).unwrap();

    assert_eq!(event.event_type(), ISSUE_OPENED);
    assert_eq!(event.get("number"), Some(&json!(123)));
    assert_eq!(event.get_str("title"), Some("Bug: Login fails with 500 error"));
    assert_eq!(event.get_str("body"), Some("The server crashes."));
}

#[parameterized(
    pr_closed = { "pull_request", "closed" },
    pr_labeled = { "pull_request", "labeled" },
    issue_closed = { "issues", "closed" },
    push = { "push", "opened" },
    unknown = { "unknown", "opened" },
)]
fn ignored_deliveries(kind: &str, action: &str) {
    assert!(translate(kind, &pr_payload(action)).is_none());
}

#[test]
fn missing_action_is_ignored() {
    assert!(translate("pull_request", &json!({})).is_none());
}

#[test]
fn missing_fields_become_null() {
    let event = translate("pull_request", &json!({"action": "opened"})).unwrap();
    assert_eq!(event.get("repo"), Some(&Value::Null));
    assert_eq!(event.get("number"), Some(&Value::Null));
    assert_eq!(event.get("author"), Some(&Value::Null));
}

#[test]
fn delivery_id_becomes_event_id() {
    let delivery: Delivery = serde_json::from_value(json!({
        "event": "pull_request",
        "payload": pr_payload("opened"),
        "delivery": "72d3162e-cc78-11e3-81ab-4c9367dc0958",
    }))
    .unwrap();

    let event = delivery.into_event().unwrap();
    assert_eq!(event.id(), "72d3162e-cc78-11e3-81ab-4c9367dc0958");
}

#[test]
fn delivery_without_id_gets_uuid() {
    let delivery: Delivery = serde_json::from_value(json!({
        "event": "pull_request",
        "payload": pr_payload("opened"),
    }))
    .unwrap();

    let event = delivery.into_event().unwrap();
    assert!(Uuid::parse_str(event.id()).is_ok());
}

#[test]
fn ignored_delivery_has_no_event() {
    let delivery = Delivery {
        event: "push".to_string(),
        payload: json!({}),
        delivery: None,
    };
    assert!(delivery.into_event().is_none());
}
