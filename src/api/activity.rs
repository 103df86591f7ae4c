//! Learning activity and history handlers.

use actix_web::{HttpResponse, web};
use chrono::{Duration, Utc};

use super::{created, ok};
use crate::config::Config;
use crate::db::DbPool;
use crate::db::activity::HistoryFilter;
use crate::error::{AppError, AppResult};
use crate::models::{
    ActivityEntry, ActivityType, HistoryQuery, LearningHistoryQuery, LearningHistoryResponse,
    LogActivityRequest, NewActivity, clamp_limit, non_blank, require, require_str,
};
use crate::services::LearningTracker;
use crate::services::stats::daily_summary;

const DEFAULT_HISTORY_LIMIT: u64 = 50;
const MAX_HISTORY_LIMIT: u64 = 200;
const DEFAULT_HISTORY_DAYS: u32 = 30;
const MAX_HISTORY_DAYS: u32 = 365;

/// Record a learning activity.
///
/// Module activities also update module progress. Stats are refreshed afterwards.
#[utoipa::path(
    post,
    path = "/api/activity",
    tag = "Activity",
    request_body = LogActivityRequest,
    responses(
        (status = 201, description = "Activity recorded", body = ActivityEntry),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn log_activity(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    body: web::Json<LogActivityRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let user_id = require_str(body.user_id, "userId")?;
    let activity_type = require(body.activity_type, "activityType")?;

    let activity = NewActivity::new(user_id, activity_type)
        .with_module(non_blank(body.module_id))
        .with_progress(body.progress)
        .with_time_spent(body.time_spent.unwrap_or(0))
        .with_metadata(body.metadata);

    let tracker = LearningTracker::new(&pool, &config);
    let entry = tracker
        .record_activity(activity, non_blank(body.module_title))
        .await?;

    Ok(created(ActivityEntry::from(entry)))
}

/// List recent activity, newest first.
#[utoipa::path(
    get,
    path = "/api/activity",
    tag = "Activity",
    params(
        ("userId" = String, Query, description = "User identifier"),
        ("limit" = Option<u64>, Query, description = "Max entries (default 50, max 200)"),
        ("activityType" = Option<String>, Query, description = "Filter by activity type"),
        ("moduleId" = Option<String>, Query, description = "Filter by module")
    ),
    responses(
        (status = 200, description = "Activity entries", body = Vec<ActivityEntry>),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_activity(
    pool: web::Data<DbPool>,
    query: web::Query<HistoryQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let user_id = require_str(query.user_id, "userId")?;

    let activity_type = match non_blank(query.activity_type) {
        Some(raw) => Some(
            ActivityType::parse(&raw)
                .ok_or_else(|| AppError::InvalidInput(format!("Unknown activityType '{}'", raw)))?,
        ),
        None => None,
    };

    let filter = HistoryFilter {
        activity_type: activity_type.map(|t| t.as_str().to_string()),
        module_id: non_blank(query.module_id),
        since: None,
        limit: Some(clamp_limit(query.limit, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT)),
    };

    let entries: Vec<ActivityEntry> = pool
        .list_activities(&user_id, &filter)
        .await?
        .into_iter()
        .map(ActivityEntry::from)
        .collect();

    Ok(ok(entries))
}

/// History of the last N days with a per-day summary.
#[utoipa::path(
    get,
    path = "/api/learning-history",
    tag = "Activity",
    params(
        ("userId" = String, Query, description = "User identifier"),
        ("days" = Option<u32>, Query, description = "Window in days (default 30, max 365)")
    ),
    responses(
        (status = 200, description = "History and daily summary", body = LearningHistoryResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn learning_history(
    pool: web::Data<DbPool>,
    query: web::Query<LearningHistoryQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let user_id = require_str(query.user_id, "userId")?;
    let days = query
        .days
        .unwrap_or(DEFAULT_HISTORY_DAYS)
        .clamp(1, MAX_HISTORY_DAYS);

    let filter = HistoryFilter {
        since: Some(Utc::now() - Duration::days(days as i64)),
        ..Default::default()
    };

    let entries: Vec<ActivityEntry> = pool
        .list_activities(&user_id, &filter)
        .await?
        .into_iter()
        .map(ActivityEntry::from)
        .collect();
    let daily = daily_summary(&entries);

    Ok(ok(LearningHistoryResponse { entries, daily }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/activity")
            .route(web::get().to(list_activity))
            .route(web::post().to(log_activity)),
    )
    .service(web::resource("/learning-history").route(web::get().to(learning_history)));
}
