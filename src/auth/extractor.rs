//! Actix-web extractor for Bearer session tokens.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use std::future::{Ready, ready};

use super::verify_session_token;
use crate::config::Config;
use crate::error::AppError;

/// Extractor that requires a valid session token.
///
/// ```ignore
/// async fn protected_handler(auth: SessionAuth) -> impl Responder {
///     // auth.user_id identifies the caller
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionAuth {
    pub user_id: String,
    pub email: String,
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl FromRequest for SessionAuth {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<Config>>() else {
            return ready(Err(AppError::Internal(
                "Config missing from app data".to_string(),
            )));
        };

        let Some(token) = bearer_token(req) else {
            return ready(Err(AppError::Unauthorized(
                "Missing bearer token".to_string(),
            )));
        };

        ready(
            verify_session_token(token, &config.auth.jwt_secret).map(|claims| SessionAuth {
                user_id: claims.user_id,
                email: claims.email,
            }),
        )
    }
}
