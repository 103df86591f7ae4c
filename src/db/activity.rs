//! Database queries for the learning history.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entity::learning_history::{self, ActiveModel, Entity as History};
use crate::error::{AppError, AppResult};
use crate::models::NewActivity;

use super::DbPool;

/// Filters for listing history entries.
#[derive(Debug, Default)]
pub struct HistoryFilter {
    pub activity_type: Option<String>,
    pub module_id: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<u64>,
}

/// Minimal projection of a history row used for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityFact {
    pub activity_type: String,
    pub time_spent: i64,
    pub occurred_at: DateTime<Utc>,
}

impl DbPool {
    /// Append an entry to the learning history.
    pub async fn insert_activity(&self, activity: NewActivity) -> AppResult<learning_history::Model> {
        let model = ActiveModel {
            user_id: Set(activity.user_id),
            activity_type: Set(activity.activity_type.as_str().to_string()),
            module_id: Set(activity.module_id),
            progress: Set(activity.progress),
            time_spent: Set(activity.time_spent),
            metadata: Set(activity.metadata),
            occurred_at: Set(Utc::now()),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert activity: {}", e)))?;

        Ok(result)
    }

    /// List a user's history entries, newest first.
    pub async fn list_activities(
        &self,
        user_id: &str,
        filter: &HistoryFilter,
    ) -> AppResult<Vec<learning_history::Model>> {
        let mut select = History::find().filter(learning_history::Column::UserId.eq(user_id));

        if let Some(activity_type) = &filter.activity_type {
            select = select.filter(learning_history::Column::ActivityType.eq(activity_type.as_str()));
        }
        if let Some(module_id) = &filter.module_id {
            select = select.filter(learning_history::Column::ModuleId.eq(module_id.as_str()));
        }
        if let Some(since) = filter.since {
            select = select.filter(learning_history::Column::OccurredAt.gte(since));
        }

        let result = select
            .order_by_desc(learning_history::Column::OccurredAt)
            .order_by_desc(learning_history::Column::Id)
            .limit(filter.limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list activities: {}", e)))?;

        Ok(result)
    }

    /// Type, duration and time of every history entry for a user.
    pub async fn activity_facts(&self, user_id: &str) -> AppResult<Vec<ActivityFact>> {
        let rows: Vec<(String, i64, DateTime<Utc>)> = History::find()
            .select_only()
            .column(learning_history::Column::ActivityType)
            .column(learning_history::Column::TimeSpent)
            .column(learning_history::Column::OccurredAt)
            .filter(learning_history::Column::UserId.eq(user_id))
            .order_by_asc(learning_history::Column::OccurredAt)
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to load activity facts: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(activity_type, time_spent, occurred_at)| ActivityFact {
                activity_type,
                time_spent,
                occurred_at,
            })
            .collect())
    }
}
