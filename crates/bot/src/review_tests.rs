// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use yare::parameterized;

#[test]
fn parses_bare_json() {
    let review = parse_review(
        r#"{"summary": "adds auth", "quality_score": 9, "issues": [], "suggestions": ["more tests"], "recommendation": "approve"}"#,
    );

    assert_eq!(review.summary, "adds auth");
    assert_eq!(review.quality_score, 9);
    assert_eq!(review.suggestions, vec!["more tests"]);
    assert_eq!(review.recommendation, Recommendation::Approve);
}

#[test]
fn parses_json_inside_prose() {
    let reply = "Here is my review:\n```json\n{\"recommendation\": \"request_changes\", \"issues\": [\"no tests\"]}\n```\nThanks!";
    let review = parse_review(reply);

    assert_eq!(review.recommendation, Recommendation::RequestChanges);
    assert_eq!(review.issues, vec!["no tests"]);
    // Missing fields take defaults
    assert_eq!(review.quality_score, 7);
}

#[parameterized(
    empty = { "" },
    prose = { "Looks fine to me." },
    broken_json = { "{\"summary\": " },
    reversed_braces = { "} nothing {" },
    unknown_recommendation = { "{\"recommendation\": \"merge it\"}" },
)]
fn unusable_reply_falls_back_to_comment(reply: &str) {
    let review = parse_review(reply);
    assert_eq!(review.recommendation, Recommendation::Comment);
    assert_eq!(review.quality_score, 7);
    assert_eq!(review.summary, reply);
}

#[test]
fn fallback_summary_is_truncated() {
    let reply = "x".repeat(1000);
    assert_eq!(parse_review(&reply).summary.len(), 200);
}

#[test]
fn review_comment_truncates_raw_reply() {
    let reply = "é".repeat(600);
    let comment = ReviewComment::new(Review::default(), &reply);
    assert_eq!(comment.raw.chars().count(), 500);
}

#[test]
fn status_serializes_snake_case() {
    assert_eq!(
        serde_json::to_value(PrStatus::ChangesRequested).unwrap(),
        json!("changes_requested")
    );
    assert_eq!(PrStatus::ChangesRequested.to_string(), "changes_requested");
    assert_eq!(PrStatus::Approved.to_string(), "approved");
}

#[test]
fn state_keys() {
    assert_eq!(PrContext::state_key("org/repo#1"), "pr:org/repo#1");
    assert_eq!(IssueAnalysis::state_key("org/repo#2"), "issue:org/repo#2");
}
