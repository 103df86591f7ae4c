//! Database queries for commit practice sessions.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entity::commit_practice::{self, ActiveModel, Entity as CommitPractice};
use crate::error::{AppError, AppResult};

use super::DbPool;

/// A practice attempt ready to be stored.
#[derive(Debug, Clone)]
pub struct NewPracticeSession {
    pub user_id: String,
    pub module_id: Option<String>,
    pub commit_message: String,
    pub expected_type: Option<String>,
    pub actual_type: Option<String>,
    pub success: bool,
    pub attempts: i32,
}

impl DbPool {
    /// Store a practice attempt.
    pub async fn insert_practice_session(
        &self,
        session: NewPracticeSession,
    ) -> AppResult<commit_practice::Model> {
        let model = ActiveModel {
            user_id: Set(session.user_id),
            module_id: Set(session.module_id),
            commit_message: Set(session.commit_message),
            expected_type: Set(session.expected_type),
            actual_type: Set(session.actual_type),
            success: Set(session.success),
            attempts: Set(session.attempts.max(1)),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert practice session: {}", e)))?;

        Ok(result)
    }

    /// Total and successful practice counts for a user.
    pub async fn practice_counts(&self, user_id: &str) -> AppResult<(u64, u64)> {
        let base = CommitPractice::find().filter(commit_practice::Column::UserId.eq(user_id));

        let total = base
            .clone()
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count practice sessions: {}", e)))?;

        let successful = base
            .filter(commit_practice::Column::Success.eq(true))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count practice sessions: {}", e)))?;

        Ok((total, successful))
    }

    /// Most recent practice attempts, newest first.
    pub async fn list_practice_sessions(
        &self,
        user_id: &str,
        limit: u64,
    ) -> AppResult<Vec<commit_practice::Model>> {
        let result = CommitPractice::find()
            .filter(commit_practice::Column::UserId.eq(user_id))
            .order_by_desc(commit_practice::Column::CreatedAt)
            .order_by_desc(commit_practice::Column::Id)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list practice sessions: {}", e)))?;

        Ok(result)
    }
}
