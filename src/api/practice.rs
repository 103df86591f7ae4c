//! Commit practice handlers.

use actix_web::{HttpResponse, web};

use super::{created, ok};
use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::practice::percentage;
use crate::models::{
    CommitPracticeRequest, PracticeQuery, PracticeSessionResponse, PracticeSummaryResponse,
    clamp_limit, non_blank, require_str,
};
use crate::services::{LearningTracker, PracticeAttempt};

const DEFAULT_RECENT_LIMIT: u64 = 20;
const MAX_RECENT_LIMIT: u64 = 100;

/// Record a practice commit. `success` is derived from the message when omitted.
#[utoipa::path(
    post,
    path = "/api/commits-practice",
    tag = "Practice",
    request_body = CommitPracticeRequest,
    responses(
        (status = 201, description = "Practice session stored", body = PracticeSessionResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn record_practice(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    body: web::Json<CommitPracticeRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let attempt = PracticeAttempt {
        user_id: require_str(body.user_id, "userId")?,
        module_id: non_blank(body.module_id),
        commit_message: require_str(body.commit_message, "commitMessage")?,
        expected_type: non_blank(body.expected_type),
        success: body.success,
        attempts: body.attempts,
    };

    let stored = LearningTracker::new(&pool, &config)
        .record_practice(attempt)
        .await?;

    Ok(created(PracticeSessionResponse::from(stored)))
}

/// Practice summary with the most recent attempts.
#[utoipa::path(
    get,
    path = "/api/commits-practice",
    tag = "Practice",
    params(
        ("userId" = String, Query, description = "User identifier"),
        ("limit" = Option<u64>, Query, description = "Recent attempts to include (default 20, max 100)")
    ),
    responses(
        (status = 200, description = "Practice summary", body = PracticeSummaryResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn practice_summary(
    pool: web::Data<DbPool>,
    query: web::Query<PracticeQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let user_id = require_str(query.user_id, "userId")?;
    let limit = clamp_limit(query.limit, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT);

    let (total, successful) = pool.practice_counts(&user_id).await?;
    let recent = pool
        .list_practice_sessions(&user_id, limit)
        .await?
        .into_iter()
        .map(PracticeSessionResponse::from)
        .collect();

    Ok(ok(PracticeSummaryResponse {
        total_practice_count: total,
        successful_practice_count: successful,
        success_rate: percentage(successful, total),
        recent,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/commits-practice")
            .route(web::get().to(practice_summary))
            .route(web::post().to(record_practice)),
    );
}
