//! Module progress handlers.

use actix_web::{HttpResponse, web};

use super::ok;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{
    ModuleProgressResponse, ModuleProgressUpdate, ProgressQuery, UpdateProgressRequest,
    non_blank, require, require_str,
};
use crate::services::LearningTracker;

/// Save progress for a module.
///
/// The latest progress value wins, time accumulates, completion latches.
#[utoipa::path(
    post,
    path = "/api/progress",
    tag = "Progress",
    request_body = UpdateProgressRequest,
    responses(
        (status = 200, description = "Stored progress", body = ModuleProgressResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_progress(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    body: web::Json<UpdateProgressRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let update = ModuleProgressUpdate {
        user_id: require_str(body.user_id, "userId")?,
        module_id: require_str(body.module_id, "moduleId")?,
        module_title: non_blank(body.module_title),
        progress: Some(require(body.progress, "progress")?),
        time_spent: body.time_spent.unwrap_or(0).max(0),
        completed: body.completed.unwrap_or(false),
    };

    let stored = pool.upsert_module_progress(&update).await?;
    LearningTracker::new(&pool, &config)
        .refresh_stats(&update.user_id)
        .await?;

    Ok(ok(ModuleProgressResponse::from(stored)))
}

/// Progress for one module, or every tracked module when `moduleId` is omitted.
#[utoipa::path(
    get,
    path = "/api/progress",
    tag = "Progress",
    params(
        ("userId" = String, Query, description = "User identifier"),
        ("moduleId" = Option<String>, Query, description = "Module identifier")
    ),
    responses(
        (status = 200, description = "Module progress (single object or list)", body = ModuleProgressResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_progress(
    pool: web::Data<DbPool>,
    query: web::Query<ProgressQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let user_id = require_str(query.user_id, "userId")?;

    match non_blank(query.module_id) {
        Some(module_id) => {
            let progress = pool
                .get_module_progress(&user_id, &module_id)
                .await?
                .map(ModuleProgressResponse::from)
                .unwrap_or_else(|| ModuleProgressResponse::untracked(&user_id, &module_id));
            Ok(ok(progress))
        }
        None => {
            let all: Vec<ModuleProgressResponse> = pool
                .list_module_progress(&user_id)
                .await?
                .into_iter()
                .map(ModuleProgressResponse::from)
                .collect();
            Ok(ok(all))
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/progress")
            .route(web::get().to(get_progress))
            .route(web::post().to(update_progress)),
    );
}
