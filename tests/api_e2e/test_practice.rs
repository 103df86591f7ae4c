//! E2E tests: commit practice sessions.

use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_practice_counts_increment() {
    let app = setup().await;

    let (_, before) = get_json(&app, "/api/commits-practice?userId=u1").await;
    assert_eq!(before["data"]["totalPracticeCount"], 0);

    let (status, stored) = post_json(
        &app,
        "/api/commits-practice",
        json!({ "userId": "u1", "commitMessage": "feat(auth): add login", "expectedType": "feat" }),
    )
    .await;
    assert_eq!(status, 201, "Practice should be stored: {}", stored);
    assert_eq!(stored["data"]["success"], true);
    assert_eq!(stored["data"]["actualType"], "feat");

    let (_, after) = get_json(&app, "/api/commits-practice?userId=u1").await;
    assert_eq!(after["data"]["totalPracticeCount"], 1);
    assert_eq!(after["data"]["successfulPracticeCount"], 1);
    assert_eq!(after["data"]["successRate"], 100.0);
    assert_eq!(after["data"]["recent"].as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_wrong_type_or_bad_format_fails() {
    let app = setup().await;

    let (_, wrong_type) = post_json(
        &app,
        "/api/commits-practice",
        json!({ "userId": "u1", "commitMessage": "fix: typo", "expectedType": "feat" }),
    )
    .await;
    assert_eq!(wrong_type["data"]["success"], false);

    let (_, bad_format) = post_json(
        &app,
        "/api/commits-practice",
        json!({ "userId": "u1", "commitMessage": "updated stuff" }),
    )
    .await;
    assert_eq!(bad_format["data"]["success"], false);
    assert!(bad_format["data"]["actualType"].is_null());

    let (_, summary) = get_json(&app, "/api/commits-practice?userId=u1").await;
    assert_eq!(summary["data"]["totalPracticeCount"], 2);
    assert_eq!(summary["data"]["successfulPracticeCount"], 0);
    assert_eq!(summary["data"]["successRate"], 0.0);
}

/// Successful practice appears in the activity log and in stats.
#[actix_rt::test]
async fn test_successful_practice_is_logged_as_activity() {
    let app = setup().await;
    post_json(
        &app,
        "/api/commits-practice",
        json!({ "userId": "u1", "commitMessage": "docs: explain scopes" }),
    )
    .await;

    let (_, activity) = get_json(&app, "/api/activity?userId=u1&activityType=commit_practice").await;
    assert_eq!(activity["data"].as_array().unwrap().len(), 1);

    let (_, stats) = get_json(&app, "/api/stats?userId=u1").await;
    assert_eq!(stats["data"]["totalPracticeCount"], 1);
    assert_eq!(stats["data"]["successfulPracticeCount"], 1);
}

#[actix_rt::test]
async fn test_practice_requires_message() {
    let app = setup().await;
    let (status, err) = post_json(&app, "/api/commits-practice", json!({ "userId": "u1" })).await;
    assert_eq!(status, 400);
    assert_eq!(error_code(&err), "INVALID_INPUT");
}

/// An explicit `success` overrides the derived value and counts once.
#[actix_rt::test]
async fn test_explicit_success_counts_exactly_once() {
    let app = setup().await;
    post_json(
        &app,
        "/api/commits-practice",
        json!({ "userId": "u2", "commitMessage": "whatever", "success": false }),
    )
    .await;

    let (_, before) = get_json(&app, "/api/commits-practice?userId=u2").await;
    let (status, stored) = post_json(
        &app,
        "/api/commits-practice",
        json!({ "userId": "u2", "commitMessage": "wip", "success": true, "attempts": 3 }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(stored["data"]["attempts"], 3);

    let (_, after) = get_json(&app, "/api/commits-practice?userId=u2").await;
    let count = |v: &serde_json::Value, key: &str| v["data"][key].as_u64().unwrap();
    assert_eq!(
        count(&after, "totalPracticeCount"),
        count(&before, "totalPracticeCount") + 1
    );
    assert_eq!(
        count(&after, "successfulPracticeCount"),
        count(&before, "successfulPracticeCount") + 1
    );
}
