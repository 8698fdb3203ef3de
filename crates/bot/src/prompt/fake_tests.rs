// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn records_prompts_and_matches_rules() {
    let adapter = FakePromptAdapter::new();
    adapter.reply_when("Pull Request", &["looks good"]);
    adapter.fail_when("issue", "quota exceeded");

    assert_eq!(
        adapter.prompt("Review this Pull Request").await.unwrap(),
        vec!["looks good"]
    );
    assert!(matches!(
        adapter.prompt("Analyze this issue").await,
        Err(PromptError::CommandFailed(ref m)) if m == "quota exceeded"
    ));
    assert!(adapter.prompt("something else").await.unwrap().is_empty());

    assert_eq!(adapter.prompts().len(), 3);
}

#[tokio::test]
async fn first_matching_rule_wins() {
    let adapter = FakePromptAdapter::new();
    adapter.reply_when("a", &["first"]);
    adapter.reply_when("ab", &["second"]);

    assert_eq!(adapter.prompt("ab").await.unwrap(), vec!["first"]);
}

#[tokio::test]
async fn noop_adapter_replies_with_nothing() {
    let adapter = crate::prompt::NoOpPromptAdapter::new();
    assert!(adapter.prompt("anything").await.unwrap().is_empty());
}
