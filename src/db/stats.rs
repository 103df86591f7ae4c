//! Database queries for aggregated learning statistics.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::entity::learning_stats::{self, ActiveModel, Entity as LearningStats};
use crate::error::{AppError, AppResult};
use crate::models::Achievement;

use super::DbPool;

/// Snapshot written to the stats row after recomputation.
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub total_modules: i32,
    pub completed_modules: i32,
    pub total_time_spent: i64,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub achievements: Vec<Achievement>,
    pub last_activity: Option<DateTime<Utc>>,
}

impl DbPool {
    /// Get the stored stats row for a user.
    pub async fn get_learning_stats(
        &self,
        user_id: &str,
    ) -> AppResult<Option<learning_stats::Model>> {
        let result = LearningStats::find()
            .filter(learning_stats::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get learning stats: {}", e)))?;

        Ok(result)
    }

    /// Stored achievements for a user. Unknown or malformed entries are skipped.
    pub async fn get_achievements(&self, user_id: &str) -> AppResult<Vec<Achievement>> {
        Ok(self
            .get_learning_stats(user_id)
            .await?
            .map(|m| parse_achievements(&m.achievements))
            .unwrap_or_default())
    }

    /// Replace the stats row for a user.
    pub async fn upsert_learning_stats(
        &self,
        user_id: &str,
        snapshot: &StatsSnapshot,
    ) -> AppResult<learning_stats::Model> {
        let achievements = serde_json::to_value(&snapshot.achievements)?;

        let model = ActiveModel {
            user_id: Set(user_id.to_string()),
            total_modules: Set(snapshot.total_modules),
            completed_modules: Set(snapshot.completed_modules),
            total_time_spent: Set(snapshot.total_time_spent),
            current_streak: Set(snapshot.current_streak),
            longest_streak: Set(snapshot.longest_streak),
            achievements: Set(achievements),
            last_activity: Set(snapshot.last_activity),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        LearningStats::insert(model)
            .on_conflict(
                OnConflict::column(learning_stats::Column::UserId)
                    .update_columns([
                        learning_stats::Column::TotalModules,
                        learning_stats::Column::CompletedModules,
                        learning_stats::Column::TotalTimeSpent,
                        learning_stats::Column::CurrentStreak,
                        learning_stats::Column::LongestStreak,
                        learning_stats::Column::Achievements,
                        learning_stats::Column::LastActivity,
                        learning_stats::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to upsert learning stats: {}", e)))?;

        self.get_learning_stats(user_id).await?.ok_or_else(|| {
            AppError::Database("Failed to fetch learning stats after upsert".to_string())
        })
    }
}

/// Decode the achievements JSON column.
pub fn parse_achievements(value: &serde_json::Value) -> Vec<Achievement> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AchievementKind;
    use serde_json::json;

    #[test]
    fn test_parse_achievements_skips_unknown_entries() {
        let stored = json!([
            serde_json::to_value(Achievement::unlock(AchievementKind::FirstSteps, Utc::now())).unwrap(),
            { "id": "retired_badge", "title": "x", "description": "y", "unlockedAt": "2026-01-01T00:00:00Z" },
            "garbage"
        ]);
        let parsed = parse_achievements(&stored);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, AchievementKind::FirstSteps);
    }

    #[test]
    fn test_parse_achievements_non_array() {
        assert!(parse_achievements(&json!(null)).is_empty());
    }
}
