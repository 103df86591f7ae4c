//! Bookmark handlers.

use actix_web::{HttpResponse, web};
use serde_json::json;

use super::{created, ok};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{AddBookmarkRequest, BookmarkResponse, UserQuery, non_blank, require_str};

#[utoipa::path(
    get,
    path = "/api/bookmarks",
    tag = "Bookmarks",
    params(("userId" = String, Query, description = "User identifier")),
    responses(
        (status = 200, description = "Bookmarks", body = Vec<BookmarkResponse>),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_bookmarks(
    pool: web::Data<DbPool>,
    query: web::Query<UserQuery>,
) -> AppResult<HttpResponse> {
    let user_id = require_str(query.into_inner().user_id, "userId")?;
    let bookmarks: Vec<BookmarkResponse> = pool
        .list_bookmarks(&user_id)
        .await?
        .into_iter()
        .map(BookmarkResponse::from)
        .collect();

    Ok(ok(bookmarks))
}

/// Bookmark a module or section. Re-adding an existing bookmark returns it with 200.
#[utoipa::path(
    post,
    path = "/api/bookmarks",
    tag = "Bookmarks",
    request_body = AddBookmarkRequest,
    responses(
        (status = 201, description = "Bookmark created", body = BookmarkResponse),
        (status = 200, description = "Bookmark already existed", body = BookmarkResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn add_bookmark(
    pool: web::Data<DbPool>,
    body: web::Json<AddBookmarkRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let user_id = require_str(body.user_id, "userId")?;
    let module_id = require_str(body.module_id, "moduleId")?;
    let section_id = non_blank(body.section_id);

    let (bookmark, is_new) = pool
        .add_bookmark(&user_id, &module_id, section_id.as_deref(), non_blank(body.title))
        .await?;

    let response = BookmarkResponse::from(bookmark);
    Ok(if is_new { created(response) } else { ok(response) })
}

#[utoipa::path(
    delete,
    path = "/api/bookmarks/{id}",
    tag = "Bookmarks",
    params(
        ("id" = i64, Path, description = "Bookmark ID"),
        ("userId" = String, Query, description = "Owner of the bookmark")
    ),
    responses(
        (status = 200, description = "Bookmark deleted"),
        (status = 404, description = "Unknown bookmark", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_bookmark(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    query: web::Query<UserQuery>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let user_id = require_str(query.into_inner().user_id, "userId")?;
    pool.delete_bookmark(&user_id, id).await?;

    Ok(ok(json!({ "id": id, "deleted": true })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/bookmarks")
            .route(web::get().to(list_bookmarks))
            .route(web::post().to(add_bookmark)),
    )
    .service(web::resource("/bookmarks/{id}").route(web::delete().to(delete_bookmark)));
}
