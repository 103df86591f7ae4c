//! Domain models and DTOs for the learning platform.

pub mod activity;
pub mod bookmark;
pub mod commit;
pub mod note;
pub mod practice;
pub mod progress;
pub mod session;
pub mod stats;
pub mod user;
pub mod video;

use crate::error::{AppError, AppResult};

// Re-export commonly used types
pub use activity::{
    ActivityEntry, ActivityType, DailySummary, HistoryQuery, LearningHistoryQuery,
    LearningHistoryResponse, LogActivityRequest, NewActivity,
};
pub use bookmark::{AddBookmarkRequest, BookmarkResponse};
pub use commit::{
    ChangelogCommitInput, ChangelogRequest, GenerateCommitRequest, GenerateCommitResponse,
    ValidateCommitRequest,
};
pub use note::{CreateNoteRequest, NoteResponse, NotesQuery, UpdateNoteRequest};
pub use practice::{
    CommitPracticeRequest, PracticeQuery, PracticeSessionResponse, PracticeSummaryResponse,
};
pub use progress::{
    ModuleProgressResponse, ModuleProgressUpdate, ProgressQuery, UpdateProgressRequest,
};
pub use session::{LearningSessionResponse, SessionQuery, UpsertSessionRequest};
pub use stats::{Achievement, AchievementKind, LearningStatsResponse, StatsQuery};
pub use user::{
    AuthResponse, LoginRequest, SessionClaims, SignupRequest, UpdateProfileRequest, User,
    UserResponse,
};
pub use video::{
    RegisterVideoRequest, VideoProgressQuery, VideoProgressRequest, VideoProgressResponse,
    VideoProgressUpdate, VideoQuery, VideoResponse,
};

/// Query carrying only the user identifier.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<String>,
}

/// Require a non-blank string field, trimming surrounding whitespace.
pub fn require_str(value: Option<String>, field: &str) -> AppResult<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::InvalidInput(format!("{} is required", field))),
    }
}

/// Require a present field.
pub fn require<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::InvalidInput(format!("{} is required", field)))
}

/// Treat blank optional strings as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Clamp a requested page size to `1..=max`, falling back to `default`.
pub fn clamp_limit(limit: Option<u64>, default: u64, max: u64) -> u64 {
    limit.unwrap_or(default).clamp(1, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_str_rejects_blank() {
        assert!(require_str(None, "userId").is_err());
        assert!(require_str(Some("   ".into()), "userId").is_err());
        assert_eq!(require_str(Some(" u1 ".into()), "userId").unwrap(), "u1");
    }

    #[test]
    fn test_require_str_error_names_field() {
        let err = require_str(None, "moduleId").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: moduleId is required");
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None, 50, 200), 50);
        assert_eq!(clamp_limit(Some(0), 50, 200), 1);
        assert_eq!(clamp_limit(Some(10_000), 50, 200), 200);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some(" a ".into())), Some("a".into()));
    }
}
