//! Database queries for the video catalogue and watch progress.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

use crate::entity::user_video_progress::{self, Entity as VideoProgress};
use crate::entity::video::{self, Entity as Video};
use crate::error::{AppError, AppResult};
use crate::models::VideoProgressUpdate;

use super::DbPool;

/// Catalogue entry to insert or refresh.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub video_id: String,
    pub module_id: String,
    pub title: String,
    pub duration: Option<f64>,
    pub url: Option<String>,
}

impl DbPool {
    /// Insert or refresh a catalogue entry keyed by video ID.
    pub async fn upsert_video(&self, new: NewVideo) -> AppResult<video::Model> {
        let now = Utc::now();
        let video_id = new.video_id.clone();

        let model = video::ActiveModel {
            video_id: Set(new.video_id),
            module_id: Set(new.module_id),
            title: Set(new.title),
            duration: Set(new.duration),
            url: Set(new.url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Video::insert(model)
            .on_conflict(
                OnConflict::column(video::Column::VideoId)
                    .update_columns([
                        video::Column::ModuleId,
                        video::Column::Title,
                        video::Column::Duration,
                        video::Column::Url,
                        video::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to upsert video: {}", e)))?;

        Video::find_by_id(video_id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get video: {}", e)))?
            .ok_or_else(|| AppError::Database("Failed to fetch video after upsert".to_string()))
    }

    /// List catalogue entries, optionally for one module.
    pub async fn list_videos(&self, module_id: Option<&str>) -> AppResult<Vec<video::Model>> {
        let mut select = Video::find();
        if let Some(module_id) = module_id {
            select = select.filter(video::Column::ModuleId.eq(module_id));
        }

        let result = select
            .order_by_asc(video::Column::ModuleId)
            .order_by_asc(video::Column::VideoId)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list videos: {}", e)))?;

        Ok(result)
    }

    /// Get a user's progress on one video.
    pub async fn get_video_progress(
        &self,
        user_id: &str,
        video_id: &str,
    ) -> AppResult<Option<user_video_progress::Model>> {
        let result = VideoProgress::find()
            .filter(user_video_progress::Column::UserId.eq(user_id))
            .filter(user_video_progress::Column::VideoId.eq(video_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get video progress: {}", e)))?;

        Ok(result)
    }

    /// List all of a user's video progress, most recently watched first.
    pub async fn list_video_progress(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<user_video_progress::Model>> {
        let result = VideoProgress::find()
            .filter(user_video_progress::Column::UserId.eq(user_id))
            .order_by_desc(user_video_progress::Column::LastWatched)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list video progress: {}", e)))?;

        Ok(result)
    }

    /// Fold a playback heartbeat into the stored progress.
    ///
    /// Returns the stored row and whether this heartbeat completed the video.
    pub async fn upsert_video_progress(
        &self,
        update: &VideoProgressUpdate,
    ) -> AppResult<(user_video_progress::Model, bool)> {
        let existing = self
            .get_video_progress(&update.user_id, &update.video_id)
            .await?;
        let now = Utc::now();
        let merged = update.merge(existing.as_ref(), now);

        let model = user_video_progress::ActiveModel {
            user_id: Set(update.user_id.clone()),
            video_id: Set(update.video_id.clone()),
            module_id: Set(merged.module_id),
            progress: Set(merged.progress),
            current_position: Set(merged.current_position),
            duration: Set(merged.duration),
            completed: Set(merged.completed),
            watch_count: Set(merged.watch_count),
            completed_at: Set(merged.completed_at),
            last_watched: Set(now),
            ..Default::default()
        };

        VideoProgress::insert(model)
            .on_conflict(
                OnConflict::columns([
                    user_video_progress::Column::UserId,
                    user_video_progress::Column::VideoId,
                ])
                .update_columns([
                    user_video_progress::Column::ModuleId,
                    user_video_progress::Column::Progress,
                    user_video_progress::Column::CurrentPosition,
                    user_video_progress::Column::Duration,
                    user_video_progress::Column::Completed,
                    user_video_progress::Column::WatchCount,
                    user_video_progress::Column::CompletedAt,
                    user_video_progress::Column::LastWatched,
                ])
                .to_owned(),
            )
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to upsert video progress: {}", e)))?;

        let stored = self
            .get_video_progress(&update.user_id, &update.video_id)
            .await?
            .ok_or_else(|| {
                AppError::Database("Failed to fetch video progress after upsert".to_string())
            })?;

        Ok((stored, merged.newly_completed))
    }

    /// Number of videos the user has completed.
    pub async fn count_completed_videos(&self, user_id: &str) -> AppResult<u64> {
        let count = VideoProgress::find()
            .filter(user_video_progress::Column::UserId.eq(user_id))
            .filter(user_video_progress::Column::Completed.eq(true))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count videos: {}", e)))?;

        Ok(count)
    }
}
