//! Learning activity models and DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::entity::learning_history;

/// Kind of user action recorded in the learning history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    ModuleStart,
    ModuleProgress,
    ModuleComplete,
    VideoWatch,
    CommitPractice,
    PageView,
    QuizComplete,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModuleStart => "module_start",
            Self::ModuleProgress => "module_progress",
            Self::ModuleComplete => "module_complete",
            Self::VideoWatch => "video_watch",
            Self::CommitPractice => "commit_practice",
            Self::PageView => "page_view",
            Self::QuizComplete => "quiz_complete",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "module_start" => Some(Self::ModuleStart),
            "module_progress" => Some(Self::ModuleProgress),
            "module_complete" => Some(Self::ModuleComplete),
            "video_watch" => Some(Self::VideoWatch),
            "commit_practice" => Some(Self::CommitPractice),
            "page_view" => Some(Self::PageView),
            "quiz_complete" => Some(Self::QuizComplete),
            _ => None,
        }
    }

    /// Whether this activity also drives module progress.
    pub fn affects_module_progress(&self) -> bool {
        matches!(
            self,
            Self::ModuleStart | Self::ModuleProgress | Self::ModuleComplete
        )
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body for POST /activity.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogActivityRequest {
    pub user_id: Option<String>,
    pub activity_type: Option<ActivityType>,
    pub module_id: Option<String>,
    pub module_title: Option<String>,
    /// 0..=100
    pub progress: Option<i32>,
    /// Seconds
    pub time_spent: Option<i64>,
    pub metadata: Option<JsonValue>,
}

/// Validated activity ready to be appended to the history.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: String,
    pub activity_type: ActivityType,
    pub module_id: Option<String>,
    pub progress: Option<i32>,
    pub time_spent: i64,
    pub metadata: Option<JsonValue>,
}

impl NewActivity {
    pub fn new(user_id: impl Into<String>, activity_type: ActivityType) -> Self {
        Self {
            user_id: user_id.into(),
            activity_type,
            module_id: None,
            progress: None,
            time_spent: 0,
            metadata: None,
        }
    }

    pub fn with_module(mut self, module_id: Option<String>) -> Self {
        self.module_id = module_id;
        self
    }

    pub fn with_progress(mut self, progress: Option<i32>) -> Self {
        self.progress = progress.map(|p| p.clamp(0, 100));
        self
    }

    pub fn with_time_spent(mut self, seconds: i64) -> Self {
        self.time_spent = seconds.max(0);
        self
    }

    pub fn with_metadata(mut self, metadata: Option<JsonValue>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Query for GET /activity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub user_id: Option<String>,
    pub limit: Option<u64>,
    pub activity_type: Option<String>,
    pub module_id: Option<String>,
}

/// Query for GET /learning-history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningHistoryQuery {
    pub user_id: Option<String>,
    pub days: Option<u32>,
}

/// A learning history entry as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: i64,
    pub user_id: String,
    pub activity_type: String,
    pub module_id: Option<String>,
    pub progress: Option<i32>,
    pub time_spent: i64,
    pub metadata: Option<JsonValue>,
    pub timestamp: DateTime<Utc>,
}

impl From<learning_history::Model> for ActivityEntry {
    fn from(m: learning_history::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            activity_type: m.activity_type,
            module_id: m.module_id,
            progress: m.progress,
            time_spent: m.time_spent,
            metadata: m.metadata,
            timestamp: m.occurred_at,
        }
    }
}

/// Activity totals for one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: NaiveDate,
    pub activities: u32,
    pub time_spent: i64,
}

/// Response for GET /learning-history.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearningHistoryResponse {
    pub entries: Vec<ActivityEntry>,
    pub daily: Vec<DailySummary>,
}
