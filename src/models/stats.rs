//! Learning statistics and achievement models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Query for GET /stats and GET /achievements.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub user_id: Option<String>,
}

/// Achievements a learner can unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    FirstSteps,
    ModuleMaster,
    HalfwayThere,
    Graduate,
    CommitApprentice,
    CommitExpert,
    WeekStreak,
    DedicatedLearner,
    VideoBuff,
}

impl AchievementKind {
    pub const ALL: [AchievementKind; 9] = [
        Self::FirstSteps,
        Self::ModuleMaster,
        Self::HalfwayThere,
        Self::Graduate,
        Self::CommitApprentice,
        Self::CommitExpert,
        Self::WeekStreak,
        Self::DedicatedLearner,
        Self::VideoBuff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstSteps => "first_steps",
            Self::ModuleMaster => "module_master",
            Self::HalfwayThere => "halfway_there",
            Self::Graduate => "graduate",
            Self::CommitApprentice => "commit_apprentice",
            Self::CommitExpert => "commit_expert",
            Self::WeekStreak => "week_streak",
            Self::DedicatedLearner => "dedicated_learner",
            Self::VideoBuff => "video_buff",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::FirstSteps => "First Steps",
            Self::ModuleMaster => "Module Master",
            Self::HalfwayThere => "Halfway There",
            Self::Graduate => "Graduate",
            Self::CommitApprentice => "Commit Apprentice",
            Self::CommitExpert => "Commit Expert",
            Self::WeekStreak => "On Fire",
            Self::DedicatedLearner => "Dedicated Learner",
            Self::VideoBuff => "Video Buff",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FirstSteps => "Recorded your first learning activity",
            Self::ModuleMaster => "Completed your first module",
            Self::HalfwayThere => "Completed half of the curriculum",
            Self::Graduate => "Completed every module",
            Self::CommitApprentice => "Wrote 10 valid practice commits",
            Self::CommitExpert => "Wrote 50 valid practice commits",
            Self::WeekStreak => "Learned 7 days in a row",
            Self::DedicatedLearner => "Spent 10 hours learning",
            Self::VideoBuff => "Finished 5 videos",
        }
    }
}

/// An unlocked achievement (stored as JSON on the stats row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: AchievementKind,
    pub title: String,
    pub description: String,
    pub unlocked_at: DateTime<Utc>,
}

impl Achievement {
    pub fn unlock(kind: AchievementKind, at: DateTime<Utc>) -> Self {
        Self {
            id: kind,
            title: kind.title().to_string(),
            description: kind.description().to_string(),
            unlocked_at: at,
        }
    }
}

/// Response for GET /stats.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearningStatsResponse {
    pub user_id: String,
    pub total_modules: i32,
    pub completed_modules: i32,
    /// Percentage of modules completed, 0..=100
    pub completion_rate: f64,
    /// Seconds
    pub total_time_spent: i64,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub total_practice_count: u64,
    pub successful_practice_count: u64,
    /// Percentage of successful practice sessions, 0..=100
    pub practice_success_rate: f64,
    pub videos_completed: u64,
    pub achievements: Vec<Achievement>,
    pub last_activity: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievement_serializes_with_snake_case_id() {
        let a = Achievement::unlock(AchievementKind::WeekStreak, Utc::now());
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["id"], "week_streak");
        assert_eq!(v["title"], "On Fire");
        assert!(v["unlockedAt"].is_string());
    }

    #[test]
    fn test_kind_ids_match_serde_names() {
        for kind in AchievementKind::ALL {
            let v = serde_json::to_value(kind).unwrap();
            assert_eq!(v.as_str(), Some(kind.as_str()));
        }
    }
}
