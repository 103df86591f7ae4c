//! Database queries for learning sessions.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde_json::Value as JsonValue;

use crate::entity::learning_session::{self, ActiveModel, Entity as LearningSession};
use crate::error::{AppError, AppResult};
use crate::models::session::merge_session;

use super::DbPool;

/// Session fields posted by the client.
#[derive(Debug, Clone)]
pub struct SessionUpdate {
    pub session_id: String,
    pub user_id: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub activities: Vec<JsonValue>,
}

impl DbPool {
    /// Get a session by its client-assigned ID.
    pub async fn get_learning_session(
        &self,
        session_id: &str,
    ) -> AppResult<Option<learning_session::Model>> {
        let result = LearningSession::find()
            .filter(learning_session::Column::SessionId.eq(session_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get session: {}", e)))?;

        Ok(result)
    }

    /// Insert or extend a session keyed by session ID.
    ///
    /// A session stays with the user who created it. Posts from anyone else
    /// are answered as if the session did not exist.
    pub async fn upsert_learning_session(
        &self,
        update: SessionUpdate,
    ) -> AppResult<learning_session::Model> {
        let existing = self.get_learning_session(&update.session_id).await?;
        if existing.as_ref().is_some_and(|s| s.user_id != update.user_id) {
            return Err(AppError::NotFound(format!("Session {}", update.session_id)));
        }
        let now = Utc::now();
        let merged = merge_session(
            existing.as_ref(),
            update.start_time,
            update.end_time,
            update.activities,
            now,
        );

        let model = ActiveModel {
            session_id: Set(update.session_id.clone()),
            user_id: Set(update.user_id.clone()),
            start_time: Set(merged.start_time),
            end_time: Set(merged.end_time),
            duration: Set(merged.duration),
            activities: Set(merged.activities),
            updated_at: Set(now),
            ..Default::default()
        };

        LearningSession::insert(model)
            .on_conflict(
                OnConflict::column(learning_session::Column::SessionId)
                    .update_columns([
                        learning_session::Column::EndTime,
                        learning_session::Column::Duration,
                        learning_session::Column::Activities,
                        learning_session::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to upsert session: {}", e)))?;

        let session = self
            .get_learning_session(&update.session_id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to fetch session after upsert".to_string()))?;
        if session.user_id != update.user_id {
            return Err(AppError::NotFound(format!("Session {}", update.session_id)));
        }

        Ok(session)
    }

    /// Most recent sessions of a user, newest first.
    pub async fn list_learning_sessions(
        &self,
        user_id: &str,
        limit: u64,
    ) -> AppResult<Vec<learning_session::Model>> {
        let result = LearningSession::find()
            .filter(learning_session::Column::UserId.eq(user_id))
            .order_by_desc(learning_session::Column::StartTime)
            .limit(limit)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list sessions: {}", e)))?;

        Ok(result)
    }
}
