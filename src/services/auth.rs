//! Authentication and session management

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{Duration, Utc};
use uuid::Uuid;

use super::credentials::CredentialHasher;
use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{Identity, IdentityKind, User},
    repository::Repository,
};

#[derive(Debug, Clone)]
struct Session {
    identity: Identity,
    expires_at: i64,
}

/// Server-side sessions keyed by the random id stored in the session cookie
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn create(&self, identity: Identity) -> String {
        let session_id = Uuid::new_v4().to_string();
        let session = Session {
            identity,
            expires_at: (Utc::now() + self.ttl).timestamp(),
        };

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        // Drop expired entries opportunistically
        let now = Utc::now().timestamp();
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(session_id.clone(), session);

        session_id
    }

    /// Identity bound to a live session
    pub fn get(&self, session_id: &str) -> Option<Identity> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions
            .get(session_id)
            .filter(|s| s.expires_at > Utc::now().timestamp())
            .map(|s| s.identity.clone())
    }

    pub fn remove(&self, session_id: &str) {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id);
    }
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    hasher: Arc<dyn CredentialHasher>,
    sessions: SessionStore,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, hasher: Arc<dyn CredentialHasher>, config: AuthConfig) -> Self {
        let sessions = SessionStore::new(Duration::hours(config.session_ttl_hours));
        Self {
            repository,
            hasher,
            sessions,
            config,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.session_cookie
    }

    fn identity_for(&self, user: &User) -> Identity {
        let kind = if user.username == self.config.guest_username {
            IdentityKind::Guest
        } else {
            IdentityKind::Full
        };
        Identity {
            user_id: user.id,
            username: user.username.clone(),
            kind,
        }
    }

    /// Check a username/password pair
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Identity> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::Authentication("Username and password are required".to_string()));
        }

        let user = self
            .repository
            .users
            .get_by_username(username.trim())
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        tracing::info!(user = %user.username, "User logged in");
        Ok(self.identity_for(&user))
    }

    /// Resolve the reserved guest identity without a password
    pub async fn authenticate_as_guest(&self) -> AppResult<Identity> {
        let user = self
            .repository
            .users
            .get_by_username(&self.config.guest_username)
            .await?
            .ok_or_else(|| {
                AppError::Authentication(
                    "Guest account is not provisioned, run the setup first".to_string(),
                )
            })?;

        tracing::info!("Guest logged in");
        Ok(Identity {
            user_id: user.id,
            username: user.username,
            kind: IdentityKind::Guest,
        })
    }

    pub fn open_session(&self, identity: Identity) -> String {
        self.sessions.create(identity)
    }

    pub fn resolve_session(&self, session_id: &str) -> Option<Identity> {
        self.sessions.get(session_id)
    }

    pub fn close_session(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }
}
