//! Learning session handlers.

use actix_web::{HttpResponse, web};

use super::ok;
use crate::db::DbPool;
use crate::db::sessions::SessionUpdate;
use crate::error::{AppError, AppResult};
use crate::models::{
    LearningSessionResponse, SessionQuery, UpsertSessionRequest, clamp_limit, require_str,
};

const DEFAULT_SESSION_LIMIT: u64 = 20;
const MAX_SESSION_LIMIT: u64 = 100;

/// Start or extend a learning session.
#[utoipa::path(
    post,
    path = "/api/sessions",
    tag = "Sessions",
    request_body = UpsertSessionRequest,
    responses(
        (status = 200, description = "Stored session", body = LearningSessionResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Session belongs to another user", body = crate::error::ErrorResponse),
    )
)]
pub async fn upsert_session(
    pool: web::Data<DbPool>,
    body: web::Json<UpsertSessionRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let session = pool
        .upsert_learning_session(SessionUpdate {
            session_id: require_str(body.session_id, "sessionId")?,
            user_id: require_str(body.user_id, "userId")?,
            start_time: body.start_time,
            end_time: body.end_time,
            activities: body.activities.unwrap_or_default(),
        })
        .await?;

    Ok(ok(LearningSessionResponse::from(session)))
}

/// Recent sessions, newest first.
#[utoipa::path(
    get,
    path = "/api/sessions",
    tag = "Sessions",
    params(
        ("userId" = String, Query, description = "User identifier"),
        ("limit" = Option<u64>, Query, description = "Max sessions (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Sessions", body = Vec<LearningSessionResponse>),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_sessions(
    pool: web::Data<DbPool>,
    query: web::Query<SessionQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let user_id = require_str(query.user_id, "userId")?;
    let limit = clamp_limit(query.limit, DEFAULT_SESSION_LIMIT, MAX_SESSION_LIMIT);

    let sessions: Vec<LearningSessionResponse> = pool
        .list_learning_sessions(&user_id, limit)
        .await?
        .into_iter()
        .map(LearningSessionResponse::from)
        .collect();

    Ok(ok(sessions))
}

#[utoipa::path(
    get,
    path = "/api/sessions/{session_id}",
    tag = "Sessions",
    params(("session_id" = String, Path, description = "Client-assigned session ID")),
    responses(
        (status = 200, description = "Session", body = LearningSessionResponse),
        (status = 404, description = "Unknown session", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_session(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let session_id = path.into_inner();
    let session = pool
        .get_learning_session(&session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {}", session_id)))?;

    Ok(ok(LearningSessionResponse::from(session)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/sessions")
            .route(web::get().to(list_sessions))
            .route(web::post().to(upsert_session)),
    )
    .service(web::resource("/sessions/{session_id}").route(web::get().to(get_session)));
}
