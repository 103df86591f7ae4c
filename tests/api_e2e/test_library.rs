//! E2E tests: learning sessions, bookmarks and notes.

use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_session_upsert_keeps_start_and_appends_activities() {
    let app = setup().await;

    let (status, first) = post_json(
        &app,
        "/api/sessions",
        json!({
            "sessionId": "s-1",
            "userId": "u1",
            "startTime": "2026-10-01T10:00:00Z",
            "activities": [{ "type": "page_view" }]
        }),
    )
    .await;
    assert_eq!(status, 200, "Session should be stored: {}", first);
    assert_eq!(first["data"]["duration"], 0);

    let (_, second) = post_json(
        &app,
        "/api/sessions",
        json!({
            "sessionId": "s-1",
            "userId": "u1",
            "startTime": "2026-10-01T11:00:00Z",
            "endTime": "2026-10-01T10:30:00Z",
            "activities": [{ "type": "quiz_complete" }]
        }),
    )
    .await;
    assert_eq!(second["data"]["startTime"], "2026-10-01T10:00:00Z");
    assert_eq!(second["data"]["duration"], 1800);
    assert_eq!(second["data"]["activities"].as_array().unwrap().len(), 2);

    let (status, fetched) = get_json(&app, "/api/sessions/s-1").await;
    assert_eq!(status, 200);
    assert_eq!(fetched["data"]["sessionId"], "s-1");

    let (_, listed) = get_json(&app, "/api/sessions?userId=u1").await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_session_stays_with_its_owner() {
    let app = setup().await;

    let (status, _) = post_json(
        &app,
        "/api/sessions",
        json!({
            "sessionId": "s-1",
            "userId": "u1",
            "activities": [{ "type": "page_view" }]
        }),
    )
    .await;
    assert_eq!(status, 200);

    let (status, err) = post_json(
        &app,
        "/api/sessions",
        json!({
            "sessionId": "s-1",
            "userId": "u2",
            "activities": [{ "type": "quiz_complete" }]
        }),
    )
    .await;
    assert_eq!(status, 404, "Foreign session post should be rejected: {}", err);
    assert_eq!(error_code(&err), "NOT_FOUND");

    let (_, fetched) = get_json(&app, "/api/sessions/s-1").await;
    assert_eq!(fetched["data"]["userId"], "u1");
    assert_eq!(fetched["data"]["activities"].as_array().unwrap().len(), 1);

    let (_, listed) = get_json(&app, "/api/sessions?userId=u2").await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_unknown_session_is_not_found() {
    let app = setup().await;
    let (status, err) = get_json(&app, "/api/sessions/missing").await;
    assert_eq!(status, 404);
    assert_eq!(error_code(&err), "NOT_FOUND");
}

#[actix_rt::test]
async fn test_bookmark_is_idempotent() {
    let app = setup().await;
    let body = json!({ "userId": "u1", "moduleId": "git-basics", "sectionId": "staging" });

    let (status, first) = post_json(&app, "/api/bookmarks", body.clone()).await;
    assert_eq!(status, 201, "Bookmark should be created: {}", first);

    let (status, again) = post_json(&app, "/api/bookmarks", body).await;
    assert_eq!(status, 200);
    assert_eq!(again["data"]["id"], first["data"]["id"]);

    let (_, listed) = get_json(&app, "/api/bookmarks?userId=u1").await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let id = first["data"]["id"].as_i64().unwrap();
    let (status, _) = delete(&app, &format!("/api/bookmarks/{}?userId=other", id)).await;
    assert_eq!(status, 404);

    let (status, deleted) = delete(&app, &format!("/api/bookmarks/{}?userId=u1", id)).await;
    assert_eq!(status, 200);
    assert_eq!(deleted["data"]["deleted"], true);

    let (_, listed) = get_json(&app, "/api/bookmarks?userId=u1").await;
    assert_eq!(listed["data"], json!([]));
}

/// Two adds racing for the same bookmark both succeed; one of them creates it.
#[actix_rt::test]
async fn test_concurrent_bookmark_adds_resolve_to_one_row() {
    let pool = create_test_pool().await;

    let (a, b) = futures_util::future::join(
        pool.add_bookmark("u1", "git-basics", Some("staging"), None),
        pool.add_bookmark("u1", "git-basics", Some("staging"), Some("Staging".to_string())),
    )
    .await;
    let (first, first_new) = a.expect("first add should succeed");
    let (second, second_new) = b.expect("second add should succeed");

    assert_eq!(first.id, second.id);
    assert!(first_new ^ second_new, "exactly one add creates the row");
    assert_eq!(pool.list_bookmarks("u1").await.unwrap().len(), 1);
}

/// Notes belonging to another user behave as if they did not exist.
#[actix_rt::test]
async fn test_notes_are_scoped_to_owner() {
    let app = setup().await;

    let (status, note) = post_json(
        &app,
        "/api/notes",
        json!({ "userId": "u1", "moduleId": "git-basics", "content": "staging area = index" }),
    )
    .await;
    assert_eq!(status, 201, "Note should be created: {}", note);
    let id = note["data"]["id"].as_i64().unwrap();

    let (status, _) = put_json(
        &app,
        &format!("/api/notes/{}", id),
        json!({ "userId": "intruder", "content": "hijacked" }),
    )
    .await;
    assert_eq!(status, 404);

    let (status, updated) = put_json(
        &app,
        &format!("/api/notes/{}", id),
        json!({ "userId": "u1", "content": "the index stages changes" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["data"]["content"], "the index stages changes");

    let (_, filtered) = get_json(&app, "/api/notes?userId=u1&moduleId=other-module").await;
    assert_eq!(filtered["data"], json!([]));

    let (status, _) = delete(&app, &format!("/api/notes/{}?userId=intruder", id)).await;
    assert_eq!(status, 404);

    let (status, _) = delete(&app, &format!("/api/notes/{}?userId=u1", id)).await;
    assert_eq!(status, 200);

    let (_, remaining) = get_json(&app, "/api/notes?userId=u1").await;
    assert_eq!(remaining["data"], json!([]));
}

#[actix_rt::test]
async fn test_note_requires_content() {
    let app = setup().await;
    let (status, _) = post_json(
        &app,
        "/api/notes",
        json!({ "userId": "u1", "moduleId": "git-basics", "content": "   " }),
    )
    .await;
    assert_eq!(status, 400);
}
