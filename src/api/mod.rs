//! API endpoint modules.
//!
//! Every handler answers with the `{success, data}` envelope on success and
//! [`ErrorResponse`](crate::error::ErrorResponse) on failure.

pub mod activity;
pub mod auth;
pub mod bookmarks;
pub mod commit_tools;
pub mod health;
pub mod locales;
pub mod notes;
pub mod openapi;
pub mod practice;
pub mod progress;
pub mod sessions;
pub mod stats;
pub mod videos;

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::error::AppError;

pub use openapi::ApiDoc;

/// Maximum accepted JSON body size.
const JSON_LIMIT_BYTES: usize = 256 * 1024;

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

/// 200 with the success envelope.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse {
        success: true,
        data,
    })
}

/// 201 with the success envelope.
pub fn created<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse {
        success: true,
        data,
    })
}

/// Map malformed bodies to the 400 envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

/// Map malformed query strings to the 400 envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

/// Map malformed path segments to the 400 envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

/// Register every `/api` route together with the extractor configs.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(activity::configure_routes)
        .configure(progress::configure_routes)
        .configure(stats::configure_routes)
        .configure(videos::configure_routes)
        .configure(practice::configure_routes)
        .configure(sessions::configure_routes)
        .configure(bookmarks::configure_routes)
        .configure(notes::configure_routes)
        .configure(commit_tools::configure_routes);
}
