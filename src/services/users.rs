//! User credential management

use std::sync::Arc;

use validator::Validate;

use super::credentials::CredentialHasher;
use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, Identity, UserShort},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    hasher: Arc<dyn CredentialHasher>,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, hasher: Arc<dyn CredentialHasher>, config: AuthConfig) -> Self {
        Self {
            repository,
            hasher,
            config,
        }
    }

    pub fn is_reserved(&self, username: &str) -> bool {
        username == self.config.admin_username || username == self.config.guest_username
    }

    pub async fn list(&self) -> AppResult<Vec<UserShort>> {
        self.repository.users.list().await
    }

    pub async fn create(&self, mut data: CreateUser) -> AppResult<UserShort> {
        data.username = data.username.trim().to_string();
        data.validate()?;

        if self.repository.users.username_exists(&data.username).await? {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let hash = self.hasher.hash(&data.password)?;
        let user = self.repository.users.create(&data.username, &hash).await?;
        tracing::info!(id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Delete a user; reserved accounts and the caller's own account are protected
    pub async fn delete(&self, caller: &Identity, id: i32) -> AppResult<()> {
        let user = self.repository.users.get_by_id(id).await?;

        if self.is_reserved(&user.username) {
            return Err(AppError::Authorization(format!(
                "Reserved account {} cannot be deleted",
                user.username
            )));
        }
        if user.id == caller.user_id {
            return Err(AppError::Authorization(
                "You cannot delete your own account".to_string(),
            ));
        }

        self.repository.users.delete(id).await?;
        tracing::info!(id, username = %user.username, by = %caller.username, "User deleted");
        Ok(())
    }
}
