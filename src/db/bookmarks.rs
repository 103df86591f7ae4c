//! Database queries for bookmarks.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};

use crate::entity::user_bookmark::{self, ActiveModel, Entity as Bookmark};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    /// Bookmark a module or section.
    ///
    /// Concurrent adds of the same bookmark resolve on the unique index, so
    /// exactly one caller sees it as newly created.
    pub async fn add_bookmark(
        &self,
        user_id: &str,
        module_id: &str,
        section_id: Option<&str>,
        title: Option<String>,
    ) -> AppResult<(user_bookmark::Model, bool)> {
        let section_id = section_id.unwrap_or_default();

        let model = ActiveModel {
            user_id: Set(user_id.to_string()),
            module_id: Set(module_id.to_string()),
            section_id: Set(section_id.to_string()),
            title: Set(title),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let inserted = Bookmark::insert(model)
            .on_conflict(
                OnConflict::columns([
                    user_bookmark::Column::UserId,
                    user_bookmark::Column::ModuleId,
                    user_bookmark::Column::SectionId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert bookmark: {}", e)))?;

        let bookmark = Bookmark::find()
            .filter(user_bookmark::Column::UserId.eq(user_id))
            .filter(user_bookmark::Column::ModuleId.eq(module_id))
            .filter(user_bookmark::Column::SectionId.eq(section_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get bookmark: {}", e)))?
            .ok_or_else(|| AppError::Internal("Bookmark missing after insert".to_string()))?;

        Ok((bookmark, inserted > 0))
    }

    /// List a user's bookmarks, newest first.
    pub async fn list_bookmarks(&self, user_id: &str) -> AppResult<Vec<user_bookmark::Model>> {
        let result = Bookmark::find()
            .filter(user_bookmark::Column::UserId.eq(user_id))
            .order_by_desc(user_bookmark::Column::CreatedAt)
            .order_by_desc(user_bookmark::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list bookmarks: {}", e)))?;

        Ok(result)
    }

    /// Delete a bookmark owned by the user.
    pub async fn delete_bookmark(&self, user_id: &str, id: i64) -> AppResult<()> {
        let bookmark = Bookmark::find_by_id(id)
            .filter(user_bookmark::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get bookmark: {}", e)))?
            .ok_or_else(|| AppError::NotFound(format!("Bookmark {}", id)))?;

        bookmark
            .delete(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete bookmark: {}", e)))?;

        Ok(())
    }
}
