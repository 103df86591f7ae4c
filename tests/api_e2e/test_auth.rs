//! E2E tests: credential accounts and session tokens.

use actix_web::test;
use serde_json::json;

use super::test_helpers::*;

const PASSWORD: &str = "correct-horse-battery";

/// Signup returns 201 with a token that unlocks /auth/me.
#[actix_rt::test]
async fn test_signup_then_me() {
    let app = setup().await;

    let (status, body) = post_json(
        &app,
        "/api/auth/signup",
        json!({ "email": "Ada@Example.com", "password": PASSWORD, "name": "Ada" }),
    )
    .await;
    assert_eq!(status, 201, "Signup should succeed: {}", body);
    assert_eq!(body["data"]["user"]["email"], "ada@example.com");
    assert_eq!(body["data"]["user"]["oauthProvider"], "credentials");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, me) = with_token(&app, test::TestRequest::get().uri("/api/auth/me"), &token).await;
    assert_eq!(status, 200, "Me should succeed: {}", me);
    assert_eq!(me["data"]["name"], "Ada");
    assert!(me["data"].get("passwordHash").is_none());
}

#[actix_rt::test]
async fn test_duplicate_signup_conflicts() {
    let app = setup().await;
    let body = json!({ "email": "dup@example.com", "password": PASSWORD });

    let (status, _) = post_json(&app, "/api/auth/signup", body.clone()).await;
    assert_eq!(status, 201);

    let (status, err) = post_json(&app, "/api/auth/signup", body).await;
    assert_eq!(status, 409);
    assert_eq!(error_code(&err), "CONFLICT");
}

#[actix_rt::test]
async fn test_short_password_rejected() {
    let app = setup().await;
    let (status, err) = post_json(
        &app,
        "/api/auth/signup",
        json!({ "email": "short@example.com", "password": "abc" }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(error_code(&err), "INVALID_INPUT");
}

/// Wrong password and unknown email give the same 401.
#[actix_rt::test]
async fn test_login_failures_are_indistinguishable() {
    let app = setup().await;
    post_json(
        &app,
        "/api/auth/signup",
        json!({ "email": "grace@example.com", "password": PASSWORD }),
    )
    .await;

    let (status, wrong_pw) = post_json(
        &app,
        "/api/auth/login",
        json!({ "email": "grace@example.com", "password": "not-the-password" }),
    )
    .await;
    assert_eq!(status, 401);

    let (status, unknown) = post_json(
        &app,
        "/api/auth/login",
        json!({ "email": "nobody@example.com", "password": PASSWORD }),
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(wrong_pw["error"], unknown["error"]);
}

#[actix_rt::test]
async fn test_login_is_case_insensitive_on_email() {
    let app = setup().await;
    post_json(
        &app,
        "/api/auth/signup",
        json!({ "email": "linus@example.com", "password": PASSWORD }),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/api/auth/login",
        json!({ "email": "LINUS@example.com", "password": PASSWORD }),
    )
    .await;
    assert_eq!(status, 200, "Login should succeed: {}", body);
    assert!(body["data"]["token"].is_string());
    assert!(body["data"]["expiresAt"].is_string());
}

#[actix_rt::test]
async fn test_me_requires_token() {
    let app = setup().await;

    let (status, err) = get_json(&app, "/api/auth/me").await;
    assert_eq!(status, 401);
    assert_eq!(error_code(&err), "UNAUTHORIZED");

    let (status, _) =
        with_token(&app, test::TestRequest::get().uri("/api/auth/me"), "garbage").await;
    assert_eq!(status, 401);
}

#[actix_rt::test]
async fn test_update_profile() {
    let app = setup().await;
    let (_, body) = post_json(
        &app,
        "/api/auth/signup",
        json!({ "email": "margaret@example.com", "password": PASSWORD }),
    )
    .await;
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, updated) = with_token(
        &app,
        test::TestRequest::put()
            .uri("/api/auth/me")
            .set_json(json!({ "name": "Margaret", "avatarUrl": "https://example.com/m.png" })),
        &token,
    )
    .await;
    assert_eq!(status, 200, "Update should succeed: {}", updated);
    assert_eq!(updated["data"]["name"], "Margaret");
    assert_eq!(updated["data"]["avatarUrl"], "https://example.com/m.png");
}
