//! Module progress models and upsert merge rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use utoipa::ToSchema;

use crate::entity::module_progress;

/// Oldest watch-time entries are dropped beyond this many.
pub const MAX_WATCH_TIME_ENTRIES: usize = 200;

/// Request body for POST /progress.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequest {
    pub user_id: Option<String>,
    pub module_id: Option<String>,
    pub module_title: Option<String>,
    /// 0..=100
    pub progress: Option<i32>,
    /// Seconds to add to the module's time spent
    pub time_spent: Option<i64>,
    pub completed: Option<bool>,
}

/// Query for GET /progress.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQuery {
    pub user_id: Option<String>,
    pub module_id: Option<String>,
}

/// Validated progress change for one (user, module) pair.
#[derive(Debug, Clone)]
pub struct ModuleProgressUpdate {
    pub user_id: String,
    pub module_id: String,
    pub module_title: Option<String>,
    /// `None` keeps the stored value (0 for a new record).
    pub progress: Option<i32>,
    pub time_spent: i64,
    pub completed: bool,
}

/// Column values to write for an upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedModuleProgress {
    pub module_title: Option<String>,
    pub progress: i32,
    pub completed: bool,
    pub time_spent: i64,
    pub watch_times: JsonValue,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub last_accessed: DateTime<Utc>,
}

impl ModuleProgressUpdate {
    /// Fold this update into the stored record.
    ///
    /// Progress is overwritten with the latest value, time accumulates, and
    /// completion latches.
    pub fn merge(
        &self,
        existing: Option<&module_progress::Model>,
        now: DateTime<Utc>,
    ) -> MergedModuleProgress {
        let previous_progress = existing.map(|m| m.progress).unwrap_or(0);
        let mut progress = self
            .progress
            .map(|p| p.clamp(0, 100))
            .unwrap_or(previous_progress);

        let was_completed = existing.map(|m| m.completed).unwrap_or(false);
        let completed = was_completed || self.completed || progress >= 100;
        if self.completed {
            progress = 100;
        }

        let time_spent = existing.map(|m| m.time_spent).unwrap_or(0) + self.time_spent.max(0);

        let mut watch_times: Vec<JsonValue> = existing
            .and_then(|m| m.watch_times.as_array().cloned())
            .unwrap_or_default();
        if self.time_spent > 0 {
            watch_times.push(json!({
                "timestamp": now.to_rfc3339(),
                "seconds": self.time_spent,
            }));
            if watch_times.len() > MAX_WATCH_TIME_ENTRIES {
                let excess = watch_times.len() - MAX_WATCH_TIME_ENTRIES;
                watch_times.drain(..excess);
            }
        }

        let completed_at = match existing.and_then(|m| m.completed_at) {
            Some(at) => Some(at),
            None if completed => Some(now),
            None => None,
        };

        MergedModuleProgress {
            module_title: self
                .module_title
                .clone()
                .or_else(|| existing.and_then(|m| m.module_title.clone())),
            progress,
            completed,
            time_spent,
            watch_times: JsonValue::Array(watch_times),
            started_at: existing.map(|m| m.started_at).unwrap_or(now),
            completed_at,
            last_accessed: now,
        }
    }
}

/// Module progress as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgressResponse {
    pub user_id: String,
    pub module_id: String,
    pub module_title: Option<String>,
    pub progress: i32,
    pub completed: bool,
    pub time_spent: i64,
    pub watch_times: JsonValue,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl ModuleProgressResponse {
    /// Zero-value record for a module the user has not touched.
    pub fn untracked(user_id: &str, module_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            module_id: module_id.to_string(),
            module_title: None,
            progress: 0,
            completed: false,
            time_spent: 0,
            watch_times: JsonValue::Array(vec![]),
            started_at: None,
            completed_at: None,
            last_accessed: None,
        }
    }
}

impl From<module_progress::Model> for ModuleProgressResponse {
    fn from(m: module_progress::Model) -> Self {
        Self {
            user_id: m.user_id,
            module_id: m.module_id,
            module_title: m.module_title,
            progress: m.progress,
            completed: m.completed,
            time_spent: m.time_spent,
            watch_times: m.watch_times,
            started_at: Some(m.started_at),
            completed_at: m.completed_at,
            last_accessed: Some(m.last_accessed),
        }
    }
}
