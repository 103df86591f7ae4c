//! Commit message validation, generation and changelog handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use super::ok;
use crate::error::AppResult;
use crate::models::{
    ChangelogRequest, GenerateCommitRequest, GenerateCommitResponse, ValidateCommitRequest,
    require, require_str,
};
use crate::services::changelog::{self, Changelog, CommitRef};
use crate::services::commit_message::{self, COMMIT_TYPES, CommitParts, ValidationResult};

/// A supported commit type.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommitTypeInfo {
    #[serde(rename = "type")]
    pub commit_type: String,
    pub description: String,
}

#[utoipa::path(
    get,
    path = "/api/commit-message/types",
    tag = "Commit Tools",
    responses(
        (status = 200, description = "Supported commit types", body = Vec<CommitTypeInfo>),
    )
)]
pub async fn list_types() -> HttpResponse {
    let types: Vec<CommitTypeInfo> = COMMIT_TYPES
        .iter()
        .map(|(commit_type, description)| CommitTypeInfo {
            commit_type: commit_type.to_string(),
            description: description.to_string(),
        })
        .collect();
    ok(types)
}

/// Validate a commit message. Invalid messages still answer 200 with `valid: false`.
#[utoipa::path(
    post,
    path = "/api/commit-message/validate",
    tag = "Commit Tools",
    request_body = ValidateCommitRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidationResult),
        (status = 400, description = "Missing message", body = crate::error::ErrorResponse),
    )
)]
pub async fn validate(body: web::Json<ValidateCommitRequest>) -> AppResult<HttpResponse> {
    let message = require(body.into_inner().message, "message")?;
    Ok(ok(commit_message::validate(&message)))
}

#[utoipa::path(
    post,
    path = "/api/commit-message/generate",
    tag = "Commit Tools",
    request_body = GenerateCommitRequest,
    responses(
        (status = 200, description = "Generated message", body = GenerateCommitResponse),
        (status = 400, description = "Unknown type or empty description", body = crate::error::ErrorResponse),
    )
)]
pub async fn generate(body: web::Json<GenerateCommitRequest>) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let commit_type = require_str(body.commit_type, "type")?;

    let message = commit_message::generate(&CommitParts {
        commit_type: &commit_type,
        scope: body.scope.as_deref(),
        description: body.description.as_deref().unwrap_or_default(),
        body: body.body.as_deref(),
        breaking: body.breaking,
        breaking_description: body.breaking_description.as_deref(),
        footers: &body.footers,
    })?;

    Ok(ok(GenerateCommitResponse { message }))
}

/// Build release notes from a list of commits.
#[utoipa::path(
    post,
    path = "/api/changelog",
    tag = "Commit Tools",
    request_body = ChangelogRequest,
    responses(
        (status = 200, description = "Generated changelog", body = Changelog),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn generate_changelog(body: web::Json<ChangelogRequest>) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());

    let commits = body.commits.iter().map(|c| CommitRef {
        message: c.message(),
        hash: c.hash(),
    });
    let log = changelog::generate(commits, body.version.as_deref(), date);

    Ok(ok(log))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/commit-message/types").route(web::get().to(list_types)))
        .service(web::resource("/commit-message/validate").route(web::post().to(validate)))
        .service(web::resource("/commit-message/generate").route(web::post().to(generate)))
        .service(web::resource("/changelog").route(web::post().to(generate_changelog)));
}
