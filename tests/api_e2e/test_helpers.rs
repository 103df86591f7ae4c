//! Shared test helpers for API E2E tests.

use actix_http::StatusCode;
use actix_web::{App, dev::ServiceResponse, test, web};
use commit_academy_lib::api;
use commit_academy_lib::config::{AuthSettings, Config, DatabaseSettings, Environment};
use commit_academy_lib::db::DbPool;
use secrecy::SecretString;
use serde_json::Value;

pub const TEST_JWT_SECRET: &str = "test-session-secret";

/// Development config with a cheap bcrypt cost.
pub fn test_config() -> Config {
    Config {
        environment: Environment::Development,
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        auth: AuthSettings {
            jwt_secret: SecretString::from(TEST_JWT_SECRET.to_string()),
            session_ttl_hours: 1,
            bcrypt_cost: 4,
        },
        locales_dir: None,
        total_modules: 10,
        cors_origins: vec![],
    }
}

/// Migrated in-memory database. A single connection keeps the data alive.
pub async fn create_test_pool() -> DbPool {
    let pool = DbPool::connect("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open in-memory database");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    pool
}

/// Create an app serving every `/api` route and the API docs, registered in
/// the same order as the server binary.
pub async fn create_test_app(
    pool: DbPool,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(pool))
            .app_data(web::Data::new(test_config()))
            .service(api::openapi::swagger_ui())
            .service(web::scope("/api").configure(api::configure_routes)),
    )
    .await
}

/// Fresh database plus app in one call.
pub async fn setup() -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    create_test_app(create_test_pool().await).await
}

async fn send<S>(app: &S, req: actix_http::Request) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| {
            panic!("Non-JSON body ({}): {}", status, String::from_utf8_lossy(&body))
        })
    };
    (status, json)
}

pub async fn get_json<S>(app: &S, uri: &str) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(app, test::TestRequest::get().uri(uri).to_request()).await
}

pub async fn post_json<S>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(
        app,
        test::TestRequest::post().uri(uri).set_json(body).to_request(),
    )
    .await
}

pub async fn put_json<S>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(
        app,
        test::TestRequest::put().uri(uri).set_json(body).to_request(),
    )
    .await
}

pub async fn delete<S>(app: &S, uri: &str) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(app, test::TestRequest::delete().uri(uri).to_request()).await
}

/// Request with a Bearer token.
pub async fn with_token<S>(
    app: &S,
    req: test::TestRequest,
    token: &str,
) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(
        app,
        req.insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request(),
    )
    .await
}

/// Assert the error envelope and return its code.
pub fn error_code(body: &Value) -> &str {
    assert_eq!(body["success"], false, "Expected error envelope: {}", body);
    body["code"].as_str().unwrap_or_default()
}
