//! Database queries for per-module progress.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::entity::module_progress::{self, ActiveModel, Entity as ModuleProgress};
use crate::error::{AppError, AppResult};
use crate::models::ModuleProgressUpdate;

use super::DbPool;

impl DbPool {
    /// Get a user's progress for one module.
    pub async fn get_module_progress(
        &self,
        user_id: &str,
        module_id: &str,
    ) -> AppResult<Option<module_progress::Model>> {
        let result = ModuleProgress::find()
            .filter(module_progress::Column::UserId.eq(user_id))
            .filter(module_progress::Column::ModuleId.eq(module_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get module progress: {}", e)))?;

        Ok(result)
    }

    /// List a user's progress for every tracked module, most recently accessed first.
    pub async fn list_module_progress(&self, user_id: &str) -> AppResult<Vec<module_progress::Model>> {
        let result = ModuleProgress::find()
            .filter(module_progress::Column::UserId.eq(user_id))
            .order_by_desc(module_progress::Column::LastAccessed)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list module progress: {}", e)))?;

        Ok(result)
    }

    /// Insert or update progress for one (user, module) pair.
    pub async fn upsert_module_progress(
        &self,
        update: &ModuleProgressUpdate,
    ) -> AppResult<module_progress::Model> {
        let existing = self
            .get_module_progress(&update.user_id, &update.module_id)
            .await?;
        let merged = update.merge(existing.as_ref(), Utc::now());

        let model = ActiveModel {
            user_id: Set(update.user_id.clone()),
            module_id: Set(update.module_id.clone()),
            module_title: Set(merged.module_title),
            progress: Set(merged.progress),
            completed: Set(merged.completed),
            time_spent: Set(merged.time_spent),
            watch_times: Set(merged.watch_times),
            started_at: Set(merged.started_at),
            completed_at: Set(merged.completed_at),
            last_accessed: Set(merged.last_accessed),
            ..Default::default()
        };

        ModuleProgress::insert(model)
            .on_conflict(
                OnConflict::columns([
                    module_progress::Column::UserId,
                    module_progress::Column::ModuleId,
                ])
                .update_columns([
                    module_progress::Column::ModuleTitle,
                    module_progress::Column::Progress,
                    module_progress::Column::Completed,
                    module_progress::Column::TimeSpent,
                    module_progress::Column::WatchTimes,
                    module_progress::Column::CompletedAt,
                    module_progress::Column::LastAccessed,
                ])
                .to_owned(),
            )
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to upsert module progress: {}", e)))?;

        self.get_module_progress(&update.user_id, &update.module_id)
            .await?
            .ok_or_else(|| {
                AppError::Database("Failed to fetch module progress after upsert".to_string())
            })
    }

    /// (completed, time_spent) for every tracked module of a user.
    pub async fn module_progress_totals(&self, user_id: &str) -> AppResult<Vec<(bool, i64)>> {
        let rows: Vec<(bool, i64)> = ModuleProgress::find()
            .select_only()
            .column(module_progress::Column::Completed)
            .column(module_progress::Column::TimeSpent)
            .filter(module_progress::Column::UserId.eq(user_id))
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to load module totals: {}", e)))?;

        Ok(rows)
    }
}
