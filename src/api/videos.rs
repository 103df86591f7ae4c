//! Video catalogue and live watch-progress handlers.

use actix_web::{HttpResponse, web};

use super::ok;
use crate::config::Config;
use crate::db::DbPool;
use crate::db::videos::NewVideo;
use crate::error::AppResult;
use crate::models::{
    RegisterVideoRequest, VideoProgressQuery, VideoProgressRequest, VideoProgressResponse,
    VideoProgressUpdate, VideoQuery, VideoResponse, non_blank, require, require_str,
};
use crate::services::LearningTracker;

/// Add or refresh a catalogue entry.
#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "Videos",
    request_body = RegisterVideoRequest,
    responses(
        (status = 200, description = "Stored catalogue entry", body = VideoResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn register_video(
    pool: web::Data<DbPool>,
    body: web::Json<RegisterVideoRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let video = pool
        .upsert_video(NewVideo {
            video_id: require_str(body.video_id, "videoId")?,
            module_id: require_str(body.module_id, "moduleId")?,
            title: require_str(body.title, "title")?,
            duration: body.duration.filter(|d| d.is_finite() && *d > 0.0),
            url: non_blank(body.url),
        })
        .await?;

    Ok(ok(VideoResponse::from(video)))
}

/// List the catalogue, optionally for one module.
#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "Videos",
    params(("moduleId" = Option<String>, Query, description = "Filter by module")),
    responses(
        (status = 200, description = "Catalogue entries", body = Vec<VideoResponse>),
    )
)]
pub async fn list_videos(
    pool: web::Data<DbPool>,
    query: web::Query<VideoQuery>,
) -> AppResult<HttpResponse> {
    let module_id = non_blank(query.into_inner().module_id);
    let videos: Vec<VideoResponse> = pool
        .list_videos(module_id.as_deref())
        .await?
        .into_iter()
        .map(VideoResponse::from)
        .collect();

    Ok(ok(videos))
}

/// Playback heartbeat. Progress never decreases and completion latches.
#[utoipa::path(
    post,
    path = "/api/video-progress-live",
    tag = "Videos",
    request_body = VideoProgressRequest,
    responses(
        (status = 200, description = "Stored video progress", body = VideoProgressResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_video_progress(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    body: web::Json<VideoProgressRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let update = VideoProgressUpdate {
        user_id: require_str(body.user_id, "userId")?,
        video_id: require_str(body.video_id, "videoId")?,
        module_id: non_blank(body.module_id),
        current_time: require(body.current_time, "currentTime")?,
        duration: body.duration,
        progress: body.progress,
    };

    let stored = LearningTracker::new(&pool, &config)
        .record_video_heartbeat(&update)
        .await?;

    Ok(ok(VideoProgressResponse::from(stored)))
}

/// Progress for one video (zero-value default when untracked), or all of the
/// user's videos when `videoId` is omitted.
#[utoipa::path(
    get,
    path = "/api/video-progress-live",
    tag = "Videos",
    params(
        ("userId" = String, Query, description = "User identifier"),
        ("videoId" = Option<String>, Query, description = "Video identifier")
    ),
    responses(
        (status = 200, description = "Video progress (single object or list)", body = VideoProgressResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_video_progress(
    pool: web::Data<DbPool>,
    query: web::Query<VideoProgressQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let user_id = require_str(query.user_id, "userId")?;

    match non_blank(query.video_id) {
        Some(video_id) => {
            let progress = pool
                .get_video_progress(&user_id, &video_id)
                .await?
                .map(VideoProgressResponse::from)
                .unwrap_or_else(|| VideoProgressResponse::untracked(&user_id, &video_id));
            Ok(ok(progress))
        }
        None => {
            let all: Vec<VideoProgressResponse> = pool
                .list_video_progress(&user_id)
                .await?
                .into_iter()
                .map(VideoProgressResponse::from)
                .collect();
            Ok(ok(all))
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/videos")
            .route(web::get().to(list_videos))
            .route(web::post().to(register_video)),
    )
    .service(
        web::resource("/video-progress-live")
            .route(web::get().to(get_video_progress))
            .route(web::post().to(update_video_progress)),
    );
}
