//! E2E tests: video catalogue and live watch progress.

use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_untracked_video_returns_default() {
    let app = setup().await;
    let (status, body) = get_json(&app, "/api/video-progress-live?userId=u1&videoId=intro").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["videoId"], "intro");
    assert_eq!(body["data"]["progress"], 0.0);
    assert_eq!(body["data"]["watchCount"], 0);
    assert!(body["data"]["lastWatched"].is_null());
}

#[actix_rt::test]
async fn test_heartbeat_requires_current_time() {
    let app = setup().await;
    let (status, err) = post_json(
        &app,
        "/api/video-progress-live",
        json!({ "userId": "u1", "videoId": "intro" }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(error_code(&err), "INVALID_INPUT");
}

/// Seeking back keeps the furthest progress; crossing 90% completes once.
#[actix_rt::test]
async fn test_heartbeats_latch_progress_and_completion() {
    let app = setup().await;
    let beat = |current_time: f64| {
        json!({
            "userId": "u1",
            "videoId": "intro",
            "moduleId": "git-basics",
            "currentTime": current_time,
            "duration": 100.0
        })
    };

    let (status, first) = post_json(&app, "/api/video-progress-live", beat(50.0)).await;
    assert_eq!(status, 200, "Heartbeat should be stored: {}", first);
    assert_eq!(first["data"]["progress"], 50.0);

    let (_, back) = post_json(&app, "/api/video-progress-live", beat(20.0)).await;
    assert_eq!(back["data"]["progress"], 50.0);
    assert_eq!(back["data"]["currentTime"], 20.0);

    let (_, done) = post_json(&app, "/api/video-progress-live", beat(95.0)).await;
    assert_eq!(done["data"]["completed"], true);
    post_json(&app, "/api/video-progress-live", beat(99.0)).await;

    let (_, watched) = get_json(&app, "/api/activity?userId=u1&activityType=video_watch").await;
    assert_eq!(watched["data"].as_array().unwrap().len(), 1);

    let (_, stats) = get_json(&app, "/api/stats?userId=u1").await;
    assert_eq!(stats["data"]["videosCompleted"], 1);

    let (_, all) = get_json(&app, "/api/video-progress-live?userId=u1").await;
    let all = all["data"].as_array().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["watchCount"], 4);
}

#[actix_rt::test]
async fn test_catalogue_register_and_filter() {
    let app = setup().await;
    for (video_id, module_id) in [("intro", "git-basics"), ("rebase", "history")] {
        let (status, body) = post_json(
            &app,
            "/api/videos",
            json!({ "videoId": video_id, "moduleId": module_id, "title": video_id, "duration": 60.0 }),
        )
        .await;
        assert_eq!(status, 200, "Video should be stored: {}", body);
    }

    // Re-registering updates in place
    post_json(
        &app,
        "/api/videos",
        json!({ "videoId": "intro", "moduleId": "git-basics", "title": "Intro to Git" }),
    )
    .await;

    let (_, all) = get_json(&app, "/api/videos").await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);

    let (_, filtered) = get_json(&app, "/api/videos?moduleId=git-basics").await;
    let filtered = filtered["data"].as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["title"], "Intro to Git");
}
