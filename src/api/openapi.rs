//! OpenAPI documentation configuration.

use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa_swagger_ui::SwaggerUi;

use crate::{api, error, models, services};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Commit Academy Server",
        version = "0.1.0",
        description = "Learning-progress tracking and Conventional Commits tooling for the Commit Academy platform"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Auth endpoints
        api::auth::signup,
        api::auth::login,
        api::auth::me,
        api::auth::update_me,
        // Activity endpoints
        api::activity::log_activity,
        api::activity::list_activity,
        api::activity::learning_history,
        // Progress endpoints
        api::progress::update_progress,
        api::progress::get_progress,
        // Stats endpoints
        api::stats::get_stats,
        api::stats::get_achievements,
        // Video endpoints
        api::videos::register_video,
        api::videos::list_videos,
        api::videos::update_video_progress,
        api::videos::get_video_progress,
        // Practice endpoints
        api::practice::record_practice,
        api::practice::practice_summary,
        // Session endpoints
        api::sessions::upsert_session,
        api::sessions::list_sessions,
        api::sessions::get_session,
        // Bookmark endpoints
        api::bookmarks::list_bookmarks,
        api::bookmarks::add_bookmark,
        api::bookmarks::delete_bookmark,
        // Note endpoints
        api::notes::list_notes,
        api::notes::create_note,
        api::notes::update_note,
        api::notes::delete_note,
        // Commit tool endpoints
        api::commit_tools::list_types,
        api::commit_tools::validate,
        api::commit_tools::generate,
        api::commit_tools::generate_changelog,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Auth
            models::SignupRequest,
            models::LoginRequest,
            models::UpdateProfileRequest,
            models::AuthResponse,
            models::UserResponse,
            // Activity
            models::ActivityType,
            models::LogActivityRequest,
            models::ActivityEntry,
            models::DailySummary,
            models::LearningHistoryResponse,
            // Progress
            models::UpdateProgressRequest,
            models::ModuleProgressResponse,
            // Stats
            models::AchievementKind,
            models::Achievement,
            models::LearningStatsResponse,
            // Videos
            models::RegisterVideoRequest,
            models::VideoResponse,
            models::VideoProgressRequest,
            models::VideoProgressResponse,
            // Practice
            models::CommitPracticeRequest,
            models::PracticeSessionResponse,
            models::PracticeSummaryResponse,
            // Sessions
            models::UpsertSessionRequest,
            models::LearningSessionResponse,
            // Bookmarks and notes
            models::AddBookmarkRequest,
            models::BookmarkResponse,
            models::CreateNoteRequest,
            models::UpdateNoteRequest,
            models::NoteResponse,
            // Commit tools
            models::ValidateCommitRequest,
            models::GenerateCommitRequest,
            models::GenerateCommitResponse,
            models::ChangelogRequest,
            models::ChangelogCommitInput,
            api::commit_tools::CommitTypeInfo,
            services::commit_message::ValidationResult,
            services::commit_message::ParsedCommit,
            services::commit_message::Footer,
            services::changelog::Changelog,
            services::changelog::ChangelogSection,
            services::changelog::ChangelogEntry,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Credential accounts and session tokens"),
        (name = "Activity", description = "Learning activity history"),
        (name = "Progress", description = "Per-module progress"),
        (name = "Stats", description = "Aggregated statistics and achievements"),
        (name = "Videos", description = "Video catalogue and live watch progress"),
        (name = "Practice", description = "Commit message practice sessions"),
        (name = "Sessions", description = "Learning sessions"),
        (name = "Bookmarks", description = "Module and section bookmarks"),
        (name = "Notes", description = "Per-module notes"),
        (name = "Commit Tools", description = "Commit message validation, generation and changelogs")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api/openapi.json";

/// Swagger UI at `/api/docs/` plus the JSON document.
///
/// Must be registered before the `/api` scope, which answers 404 for any
/// `/api/*` path it does not route itself.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api/docs/{_:.*}").url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}

/// Add the bearer session token security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
