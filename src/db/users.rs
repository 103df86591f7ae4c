//! Database operations for users.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::user::{self, ActiveModel, Entity as UserEntity};
use crate::error::{AppError, AppResult};
use crate::models::User;

use super::DbPool;

/// Provider recorded for email/password accounts.
pub const CREDENTIALS_PROVIDER: &str = "credentials";

impl DbPool {
    /// Create a credential account. Fails with `Conflict` if the email is taken.
    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        name: Option<String>,
    ) -> AppResult<User> {
        let email = email.to_lowercase();
        if self.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            email: Set(email),
            name: Set(name),
            password_hash: Set(Some(password_hash.to_string())),
            avatar_url: Set(None),
            oauth_provider: Set(CREDENTIALS_PROVIDER.to_string()),
            last_login_at: Set(Some(now)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert user: {}", e)))?;

        Ok(inserted.into())
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email.to_lowercase()))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get user: {}", e)))?;

        Ok(result.map(User::from))
    }

    /// Find a user by ID. Malformed IDs resolve to `None`.
    pub async fn find_user_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let uuid = match Uuid::parse_str(id).ok() {
            Some(u) => u,
            None => return Ok(None),
        };

        let result = UserEntity::find_by_id(uuid)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get user: {}", e)))?;

        Ok(result.map(User::from))
    }

    /// Update display name and avatar. `None` leaves a field unchanged.
    pub async fn update_user_profile(
        &self,
        id: &str,
        name: Option<String>,
        avatar_url: Option<String>,
    ) -> AppResult<User> {
        let model = self.get_user_model(id).await?;

        let mut active: ActiveModel = model.into();
        if let Some(name) = name {
            active.name = Set(Some(name));
        }
        if let Some(avatar_url) = avatar_url {
            active.avatar_url = Set(Some(avatar_url));
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update user: {}", e)))?;

        Ok(updated.into())
    }

    /// Record a successful login.
    pub async fn touch_user_login(&self, id: &str) -> AppResult<User> {
        let model = self.get_user_model(id).await?;

        let mut active: ActiveModel = model.into();
        active.last_login_at = Set(Some(Utc::now()));

        let updated = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update user: {}", e)))?;

        Ok(updated.into())
    }

    async fn get_user_model(&self, id: &str) -> AppResult<user::Model> {
        let uuid = Uuid::parse_str(id).map_err(|_| AppError::NotFound("User".to_string()))?;
        UserEntity::find_by_id(uuid)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get user: {}", e)))?
            .ok_or_else(|| AppError::NotFound("User".to_string()))
    }
}
