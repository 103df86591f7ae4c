//! E2E tests: health checks, locale files and the OpenAPI document.

use actix_web::{App, http::header, test};
use commit_academy_lib::api::{self, locales::LOCALE_CACHE_CONTROL, openapi::OPENAPI_JSON_PATH};

use super::test_helpers::*;

#[actix_rt::test]
async fn test_health_and_ready() {
    let app = setup().await;

    let (status, _) = get_json(&app, "/api/health").await;
    assert_eq!(status, 200);

    let (status, ready) = get_json(&app, "/api/ready").await;
    assert_eq!(status, 200);
    assert_eq!(ready["data"]["status"], "ready");
}

#[actix_rt::test]
async fn test_locale_files_are_served_with_cache_header() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("en")).unwrap();
    std::fs::write(
        dir.path().join("en").join("common.json"),
        r#"{"welcome":"Welcome"}"#,
    )
    .unwrap();

    let locales_dir = dir.path().to_path_buf();
    let app = test::init_service(
        App::new().configure(|cfg| api::locales::configure_routes(cfg, &locales_dir)),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/locales/en/common.json")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).unwrap(),
        LOCALE_CACHE_CONTROL
    );
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], br#"{"welcome":"Welcome"}"#);

    let missing = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/locales/fr/common.json")
            .to_request(),
    )
    .await;
    assert_eq!(missing.status(), 404);
}

#[actix_rt::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = setup().await;

    let req = test::TestRequest::post()
        .uri("/api/progress")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(error_code(&body), "INVALID_INPUT");
}

/// The docs routes sit under `/api` next to the API scope and stay reachable.
#[actix_rt::test]
async fn test_openapi_document_is_served() {
    let app = setup().await;

    let (status, doc) = get_json(&app, OPENAPI_JSON_PATH).await;
    assert_eq!(status, 200);
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/api/health",
        "/api/auth/signup",
        "/api/activity",
        "/api/progress",
        "/api/stats",
        "/api/video-progress-live",
        "/api/commits-practice",
        "/api/sessions",
        "/api/bookmarks",
        "/api/notes/{id}",
        "/api/commit-message/validate",
        "/api/changelog",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
    assert!(doc["components"]["securitySchemes"]["bearer"].is_object());

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/docs/").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
}
