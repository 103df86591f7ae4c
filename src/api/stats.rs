//! Statistics and achievements handlers.

use actix_web::{HttpResponse, web};

use super::ok;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{Achievement, LearningStatsResponse, StatsQuery, require_str};
use crate::services::LearningTracker;

/// Recompute, store and return the user's statistics.
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Stats",
    params(("userId" = String, Query, description = "User identifier")),
    responses(
        (status = 200, description = "Learning statistics", body = LearningStatsResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_stats(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    query: web::Query<StatsQuery>,
) -> AppResult<HttpResponse> {
    let user_id = require_str(query.into_inner().user_id, "userId")?;
    let stats = LearningTracker::new(&pool, &config)
        .refresh_stats(&user_id)
        .await?;
    Ok(ok(stats))
}

/// Stored achievements, without recomputation.
#[utoipa::path(
    get,
    path = "/api/achievements",
    tag = "Stats",
    params(("userId" = String, Query, description = "User identifier")),
    responses(
        (status = 200, description = "Unlocked achievements", body = Vec<Achievement>),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_achievements(
    pool: web::Data<DbPool>,
    query: web::Query<StatsQuery>,
) -> AppResult<HttpResponse> {
    let user_id = require_str(query.into_inner().user_id, "userId")?;
    Ok(ok(pool.get_achievements(&user_id).await?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/stats").route(web::get().to(get_stats)))
        .service(web::resource("/achievements").route(web::get().to(get_achievements)));
}
