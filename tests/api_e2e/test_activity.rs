//! E2E tests: activity log, module progress and statistics.

use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_missing_user_id_is_bad_request() {
    let app = setup().await;

    let (status, err) = get_json(&app, "/api/progress").await;
    assert_eq!(status, 400);
    assert_eq!(error_code(&err), "INVALID_INPUT");

    let (status, _) = post_json(
        &app,
        "/api/activity",
        json!({ "activityType": "page_view" }),
    )
    .await;
    assert_eq!(status, 400);
}

/// Every tracking POST rejects a body without `userId`, even when the rest is complete.
#[actix_rt::test]
async fn test_every_tracking_post_requires_user_id() {
    let app = setup().await;
    let cases = [
        ("/api/activity", json!({ "activityType": "page_view" })),
        ("/api/progress", json!({ "moduleId": "git-basics", "progress": 50 })),
        (
            "/api/video-progress-live",
            json!({ "videoId": "intro", "currentTime": 10.0, "duration": 100.0 }),
        ),
        ("/api/commits-practice", json!({ "commitMessage": "feat: add login" })),
        ("/api/sessions", json!({ "sessionId": "s-1" })),
        ("/api/bookmarks", json!({ "moduleId": "git-basics" })),
        ("/api/notes", json!({ "moduleId": "git-basics", "content": "remember rebase" })),
    ];

    for (uri, body) in cases {
        let (status, err) = post_json(&app, uri, body).await;
        assert_eq!(status, 400, "{} should reject a missing userId", uri);
        assert_eq!(error_code(&err), "INVALID_INPUT", "{}", uri);
        assert!(err["error"].as_str().unwrap().contains("userId"), "{}: {}", uri, err);
    }
}

#[actix_rt::test]
async fn test_unknown_activity_type_is_bad_request() {
    let app = setup().await;
    let (status, _) = post_json(
        &app,
        "/api/activity",
        json!({ "userId": "u1", "activityType": "teleport" }),
    )
    .await;
    assert_eq!(status, 400);
}

/// The last write wins for progress while time accumulates.
#[actix_rt::test]
async fn test_progress_last_write_wins() {
    let app = setup().await;

    let (status, first) = post_json(
        &app,
        "/api/progress",
        json!({ "userId": "u1", "moduleId": "git-basics", "progress": 80, "timeSpent": 60 }),
    )
    .await;
    assert_eq!(status, 200, "Progress should be stored: {}", first);

    let (_, second) = post_json(
        &app,
        "/api/progress",
        json!({ "userId": "u1", "moduleId": "git-basics", "progress": 40, "timeSpent": 30 }),
    )
    .await;
    assert_eq!(second["data"]["progress"], 40);
    assert_eq!(second["data"]["timeSpent"], 90);

    let (_, fetched) = get_json(&app, "/api/progress?userId=u1&moduleId=git-basics").await;
    assert_eq!(fetched["data"]["progress"], 40);

    let (_, all) = get_json(&app, "/api/progress?userId=u1").await;
    assert_eq!(all["data"].as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_untracked_module_returns_zero_value() {
    let app = setup().await;
    let (status, body) = get_json(&app, "/api/progress?userId=u1&moduleId=branching").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["progress"], 0);
    assert_eq!(body["data"]["completed"], false);
}

/// Completing a module through the activity log updates progress and stats.
#[actix_rt::test]
async fn test_module_complete_activity_drives_stats() {
    let app = setup().await;

    let (status, entry) = post_json(
        &app,
        "/api/activity",
        json!({
            "userId": "u1",
            "activityType": "module_complete",
            "moduleId": "git-basics",
            "moduleTitle": "Git Basics",
            "timeSpent": 120
        }),
    )
    .await;
    assert_eq!(status, 201, "Activity should be stored: {}", entry);
    assert_eq!(entry["data"]["activityType"], "module_complete");

    let (_, progress) = get_json(&app, "/api/progress?userId=u1&moduleId=git-basics").await;
    assert_eq!(progress["data"]["completed"], true);
    assert_eq!(progress["data"]["progress"], 100);
    assert_eq!(progress["data"]["moduleTitle"], "Git Basics");

    let (status, stats) = get_json(&app, "/api/stats?userId=u1").await;
    assert_eq!(status, 200);
    assert_eq!(stats["data"]["completedModules"], 1);
    assert_eq!(stats["data"]["totalModules"], 10);
    assert_eq!(stats["data"]["completionRate"], 10.0);
    assert_eq!(stats["data"]["totalTimeSpent"], 120);
    assert_eq!(stats["data"]["currentStreak"], 1);

    let (_, achievements) = get_json(&app, "/api/achievements?userId=u1").await;
    let ids: Vec<&str> = achievements["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["id"].as_str())
        .collect();
    assert!(ids.contains(&"first_steps"));
    assert!(ids.contains(&"module_master"));
}

#[actix_rt::test]
async fn test_stats_for_new_user_are_empty() {
    let app = setup().await;
    let (status, stats) = get_json(&app, "/api/stats?userId=fresh").await;
    assert_eq!(status, 200);
    assert_eq!(stats["data"]["completedModules"], 0);
    assert_eq!(stats["data"]["currentStreak"], 0);
    assert_eq!(stats["data"]["achievements"], json!([]));
}

#[actix_rt::test]
async fn test_activity_listing_filters_and_history() {
    let app = setup().await;
    for activity_type in ["page_view", "quiz_complete", "page_view"] {
        let (status, _) = post_json(
            &app,
            "/api/activity",
            json!({ "userId": "u1", "activityType": activity_type, "timeSpent": 10 }),
        )
        .await;
        assert_eq!(status, 201);
    }

    let (_, all) = get_json(&app, "/api/activity?userId=u1").await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);

    let (_, views) = get_json(&app, "/api/activity?userId=u1&activityType=page_view").await;
    assert_eq!(views["data"].as_array().unwrap().len(), 2);

    let (_, limited) = get_json(&app, "/api/activity?userId=u1&limit=1").await;
    assert_eq!(limited["data"].as_array().unwrap().len(), 1);

    let (status, history) = get_json(&app, "/api/learning-history?userId=u1&days=7").await;
    assert_eq!(status, 200);
    assert_eq!(history["data"]["entries"].as_array().unwrap().len(), 3);
    let daily = history["data"]["daily"].as_array().unwrap();
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0]["activities"], 3);
    assert_eq!(daily[0]["timeSpent"], 30);
}
