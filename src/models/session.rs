//! Learning session models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::entity::learning_session;

/// Activities kept per session; older entries are dropped first.
pub const MAX_SESSION_ACTIVITIES: usize = 200;

/// Request body for POST /sessions.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSessionRequest {
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Activities to append to the session
    pub activities: Option<Vec<JsonValue>>,
}

/// Query for GET /sessions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQuery {
    pub user_id: Option<String>,
    pub limit: Option<u64>,
}

/// Column values to write for a session upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedSession {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: i64,
    pub activities: JsonValue,
}

/// Fold a session post into the stored session.
///
/// The first start time sticks and duration is recomputed whenever an end
/// time is known. Activities accumulate up to [`MAX_SESSION_ACTIVITIES`].
pub fn merge_session(
    existing: Option<&learning_session::Model>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    activities: Vec<JsonValue>,
    now: DateTime<Utc>,
) -> MergedSession {
    let start_time = existing
        .map(|m| m.start_time)
        .or(start_time)
        .unwrap_or(now);
    let end_time = end_time.or_else(|| existing.and_then(|m| m.end_time));
    let duration = end_time
        .map(|end| (end - start_time).num_seconds().max(0))
        .unwrap_or(0);

    let mut all: Vec<JsonValue> = existing
        .and_then(|m| m.activities.as_array().cloned())
        .unwrap_or_default();
    all.extend(activities);
    if all.len() > MAX_SESSION_ACTIVITIES {
        let excess = all.len() - MAX_SESSION_ACTIVITIES;
        all.drain(..excess);
    }

    MergedSession {
        start_time,
        end_time,
        duration,
        activities: JsonValue::Array(all),
    }
}

/// A learning session as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearningSessionResponse {
    pub session_id: String,
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Seconds
    pub duration: i64,
    pub activities: JsonValue,
}

impl From<learning_session::Model> for LearningSessionResponse {
    fn from(m: learning_session::Model) -> Self {
        Self {
            session_id: m.session_id,
            user_id: m.user_id,
            start_time: m.start_time,
            end_time: m.end_time,
            duration: m.duration,
            activities: m.activities,
        }
    }
}
