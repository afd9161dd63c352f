use crate::utils::error::{ApiError, Result};
use chrono::Utc;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, user};

/// Fields a user may change about themself
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// User repository over any connection or transaction
pub struct Users<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> Users<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<user::Model>> {
        debug!("Finding user by ID: {}", user_id);

        entities::User::find_by_id(user_id.to_string())
            .one(self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        debug!("Finding user by email");

        entities::User::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// Find the user holding an API token, by the token's hash
    pub async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<user::Model>> {
        entities::User::find()
            .filter(user::Column::ApiTokenHash.eq(token_hash))
            .one(self.db)
            .await
            .map_err(ApiError::Database)
    }

    /// Create a new user
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        token_hash: &str,
    ) -> Result<user::Model> {
        debug!("Creating user");

        let now = Utc::now().into();
        let model = user::Model {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            api_token_hash: Some(token_hash.to_string()),
            created_at: now,
            updated_at: now,
        };

        entities::User::insert(model.clone().into_active_model())
            .exec_without_returning(self.db)
            .await?;

        Ok(model)
    }

    /// Replace the user's API token
    pub async fn set_token(&self, model: user::Model, token_hash: &str) -> Result<user::Model> {
        debug!("Rotating API token for user: {}", model.id);

        let mut active: user::ActiveModel = model.into();
        active.api_token_hash = Set(Some(token_hash.to_string()));
        active.updated_at = Set(Utc::now().into());

        active.update(self.db).await.map_err(ApiError::Database)
    }

    /// Apply profile changes; a duplicate email surfaces as a conflict
    pub async fn update(&self, model: user::Model, changes: UserChanges) -> Result<user::Model> {
        debug!("Updating user: {}", model.id);

        let mut active: user::ActiveModel = model.into();
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(self.db).await?)
    }

    /// Delete a user
    pub async fn delete(&self, user_id: &str) -> Result<bool> {
        debug!("Deleting user: {}", user_id);

        let result = entities::User::delete_by_id(user_id.to_string())
            .exec(self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(result.rows_affected > 0)
    }
}
