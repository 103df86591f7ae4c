//! E2E tests: commit message validation, generation and changelogs.

use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_validate_reports_parsed_commit() {
    let app = setup().await;
    let (status, body) = post_json(
        &app,
        "/api/commit-message/validate",
        json!({ "message": "feat(api)!: drop v1 endpoints" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["valid"], true);
    assert_eq!(body["data"]["parsed"]["type"], "feat");
    assert_eq!(body["data"]["parsed"]["scope"], "api");
    assert_eq!(body["data"]["parsed"]["breaking"], true);
}

/// An invalid message is still a successful request.
#[actix_rt::test]
async fn test_validate_invalid_message_is_not_an_error() {
    let app = setup().await;
    let (status, body) = post_json(
        &app,
        "/api/commit-message/validate",
        json!({ "message": "fixed the thing" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["valid"], false);
    assert!(!body["data"]["errors"].as_array().unwrap().is_empty());
    assert!(body["data"].get("parsed").is_none());
}

#[actix_rt::test]
async fn test_validate_requires_message_field() {
    let app = setup().await;
    let (status, _) = post_json(&app, "/api/commit-message/validate", json!({})).await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
async fn test_generate_builds_message() {
    let app = setup().await;
    let (status, body) = post_json(
        &app,
        "/api/commit-message/generate",
        json!({
            "type": "fix",
            "scope": "parser",
            "description": "handle empty scope",
            "breaking": true,
            "breakingDescription": "scope is now required"
        }),
    )
    .await;
    assert_eq!(status, 200, "Generate should succeed: {}", body);
    assert_eq!(
        body["data"]["message"],
        "fix(parser)!: handle empty scope\n\nBREAKING CHANGE: scope is now required"
    );
}

#[actix_rt::test]
async fn test_generate_rejects_unknown_type() {
    let app = setup().await;
    let (status, err) = post_json(
        &app,
        "/api/commit-message/generate",
        json!({ "type": "feature", "description": "x" }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(error_code(&err), "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_list_types() {
    let app = setup().await;
    let (status, body) = get_json(&app, "/api/commit-message/types").await;
    assert_eq!(status, 200);
    let types = body["data"].as_array().unwrap();
    assert_eq!(types.len(), 10);
    assert_eq!(types[0]["type"], "feat");
}

#[actix_rt::test]
async fn test_changelog_groups_commits() {
    let app = setup().await;
    let (status, body) = post_json(
        &app,
        "/api/changelog",
        json!({
            "version": "1.2.0",
            "date": "2026-10-18",
            "commits": [
                "feat(auth): add login",
                { "hash": "0123456789abcdef", "message": "fix: handle timeout" },
                "not a conventional commit"
            ]
        }),
    )
    .await;
    assert_eq!(status, 200, "Changelog should succeed: {}", body);
    let markdown = body["data"]["markdown"].as_str().unwrap();
    assert!(markdown.starts_with("## 1.2.0 (2026-10-18)\n"));
    assert!(markdown.contains("* **auth:** add login"));
    assert!(markdown.contains("* handle timeout (0123456)"));
    assert_eq!(body["data"]["skipped"], 1);
}
