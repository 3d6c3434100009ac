//! User credentials and session identity

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Stored credential
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Salted password hash (argon2 PHC string)
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Short user representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserShort {
    pub id: i32,
    pub username: String,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 3, max = 80, message = "Username must be 3 to 80 characters"))]
    pub username: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
}

/// Login form (`application/x-www-form-urlencoded`). Missing fields read as
/// empty so they fail authentication instead of the form extractor.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// What an identity may do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Read,
    Write,
}

/// Access level of an authenticated identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    Full,
    /// The reserved read-only guest account
    Guest,
}

/// Identity bound to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i32,
    pub username: String,
    pub kind: IdentityKind,
}

impl Identity {
    pub fn is_guest(&self) -> bool {
        self.kind == IdentityKind::Guest
    }

    pub fn can(&self, capability: Capability) -> bool {
        match capability {
            Capability::Read => true,
            Capability::Write => !self.is_guest(),
        }
    }

    /// Single authorization predicate evaluated before any store access
    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        if self.can(capability) {
            Ok(())
        } else {
            tracing::warn!(user = %self.username, "Refused mutation for read-only identity");
            Err(AppError::Authorization(
                "Guest account is read-only".to_string(),
            ))
        }
    }
}
