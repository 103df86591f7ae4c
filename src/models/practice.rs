//! Commit practice models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::commit_practice;

/// Request body for POST /commits-practice.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommitPracticeRequest {
    pub user_id: Option<String>,
    pub module_id: Option<String>,
    pub commit_message: Option<String>,
    /// Commit type the exercise asked for (e.g. "feat")
    pub expected_type: Option<String>,
    /// Client verdict; computed from the message when absent
    pub success: Option<bool>,
    pub attempts: Option<i32>,
}

/// Query for GET /commits-practice.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeQuery {
    pub user_id: Option<String>,
    pub limit: Option<u64>,
}

/// A stored practice attempt.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSessionResponse {
    pub id: i64,
    pub user_id: String,
    pub module_id: Option<String>,
    pub commit_message: String,
    pub expected_type: Option<String>,
    pub actual_type: Option<String>,
    pub success: bool,
    pub attempts: i32,
    pub created_at: DateTime<Utc>,
}

impl From<commit_practice::Model> for PracticeSessionResponse {
    fn from(m: commit_practice::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            module_id: m.module_id,
            commit_message: m.commit_message,
            expected_type: m.expected_type,
            actual_type: m.actual_type,
            success: m.success,
            attempts: m.attempts,
            created_at: m.created_at,
        }
    }
}

/// Aggregated practice results for a user.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSummaryResponse {
    pub total_practice_count: u64,
    pub successful_practice_count: u64,
    /// Percentage, 0..=100
    pub success_rate: f64,
    pub recent: Vec<PracticeSessionResponse>,
}

/// Percentage of `part` in `total`, rounded to one decimal.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ((part as f64 / total as f64) * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 2), 100.0);
    }
}
