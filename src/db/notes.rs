//! Database queries for notes.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};

use crate::entity::user_note::{self, ActiveModel, Entity as Note};
use crate::error::{AppError, AppResult};

use super::DbPool;

impl DbPool {
    pub async fn create_note(
        &self,
        user_id: &str,
        module_id: &str,
        content: String,
    ) -> AppResult<user_note::Model> {
        let now = Utc::now();
        let model = ActiveModel {
            user_id: Set(user_id.to_string()),
            module_id: Set(module_id.to_string()),
            content: Set(content),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert note: {}", e)))?;

        Ok(result)
    }

    /// List a user's notes, most recently edited first.
    pub async fn list_notes(
        &self,
        user_id: &str,
        module_id: Option<&str>,
    ) -> AppResult<Vec<user_note::Model>> {
        let mut select = Note::find().filter(user_note::Column::UserId.eq(user_id));
        if let Some(module_id) = module_id {
            select = select.filter(user_note::Column::ModuleId.eq(module_id));
        }

        let result = select
            .order_by_desc(user_note::Column::UpdatedAt)
            .order_by_desc(user_note::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list notes: {}", e)))?;

        Ok(result)
    }

    /// Replace a note's content. Notes owned by other users are reported as missing.
    pub async fn update_note(
        &self,
        user_id: &str,
        id: i64,
        content: String,
    ) -> AppResult<user_note::Model> {
        let note = self.get_owned_note(user_id, id).await?;

        let mut active: ActiveModel = note.into();
        active.content = Set(content);
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update note: {}", e)))?;

        Ok(result)
    }

    pub async fn delete_note(&self, user_id: &str, id: i64) -> AppResult<()> {
        let note = self.get_owned_note(user_id, id).await?;

        note.delete(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete note: {}", e)))?;

        Ok(())
    }

    async fn get_owned_note(&self, user_id: &str, id: i64) -> AppResult<user_note::Model> {
        Note::find_by_id(id)
            .filter(user_note::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get note: {}", e)))?
            .ok_or_else(|| AppError::NotFound(format!("Note {}", id)))
    }
}
