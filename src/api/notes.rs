//! Note handlers.

use actix_web::{HttpResponse, web};
use serde_json::json;

use super::{created, ok};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{
    CreateNoteRequest, NoteResponse, NotesQuery, UpdateNoteRequest, UserQuery, non_blank,
    require_str,
};

#[utoipa::path(
    get,
    path = "/api/notes",
    tag = "Notes",
    params(
        ("userId" = String, Query, description = "User identifier"),
        ("moduleId" = Option<String>, Query, description = "Filter by module")
    ),
    responses(
        (status = 200, description = "Notes", body = Vec<NoteResponse>),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_notes(
    pool: web::Data<DbPool>,
    query: web::Query<NotesQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let user_id = require_str(query.user_id, "userId")?;
    let module_id = non_blank(query.module_id);

    let notes: Vec<NoteResponse> = pool
        .list_notes(&user_id, module_id.as_deref())
        .await?
        .into_iter()
        .map(NoteResponse::from)
        .collect();

    Ok(ok(notes))
}

#[utoipa::path(
    post,
    path = "/api/notes",
    tag = "Notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_note(
    pool: web::Data<DbPool>,
    body: web::Json<CreateNoteRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let user_id = require_str(body.user_id, "userId")?;
    let module_id = require_str(body.module_id, "moduleId")?;
    let content = require_str(body.content, "content")?;

    let note = pool.create_note(&user_id, &module_id, content).await?;
    Ok(created(NoteResponse::from(note)))
}

/// Replace a note's content. Notes of other users are reported as not found.
#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    tag = "Notes",
    params(("id" = i64, Path, description = "Note ID")),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated", body = NoteResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown note", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_note(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    body: web::Json<UpdateNoteRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let body = body.into_inner();
    let user_id = require_str(body.user_id, "userId")?;
    let content = require_str(body.content, "content")?;

    let note = pool.update_note(&user_id, id, content).await?;
    Ok(ok(NoteResponse::from(note)))
}

#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    tag = "Notes",
    params(
        ("id" = i64, Path, description = "Note ID"),
        ("userId" = String, Query, description = "Owner of the note")
    ),
    responses(
        (status = 200, description = "Note deleted"),
        (status = 404, description = "Unknown note", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_note(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
    query: web::Query<UserQuery>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let user_id = require_str(query.into_inner().user_id, "userId")?;
    pool.delete_note(&user_id, id).await?;

    Ok(ok(json!({ "id": id, "deleted": true })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/notes")
            .route(web::get().to(list_notes))
            .route(web::post().to(create_note)),
    )
    .service(
        web::resource("/notes/{id}")
            .route(web::put().to(update_note))
            .route(web::delete().to(delete_note)),
    );
}
