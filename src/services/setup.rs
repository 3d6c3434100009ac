//! First-run provisioning

use std::sync::Arc;

use uuid::Uuid;

use super::credentials::CredentialHasher;
use crate::{
    config::{AuthConfig, SetupConfig},
    error::AppResult,
    repository::{setup::SetupOutcome, Repository},
};

#[derive(Clone)]
pub struct SetupService {
    repository: Repository,
    hasher: Arc<dyn CredentialHasher>,
    auth: AuthConfig,
    config: SetupConfig,
}

impl SetupService {
    pub fn new(
        repository: Repository,
        hasher: Arc<dyn CredentialHasher>,
        auth: AuthConfig,
        config: SetupConfig,
    ) -> Self {
        Self {
            repository,
            hasher,
            auth,
            config,
        }
    }

    /// Whether the database answers
    pub async fn ping(&self) -> bool {
        match self.repository.setup.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Readiness probe failed: {}", e);
                false
            }
        }
    }

    /// Create the admin and guest accounts and the seed clients if missing.
    /// Running it again changes nothing.
    pub async fn run(&self) -> AppResult<SetupOutcome> {
        let mut accounts = Vec::new();

        if !self.repository.users.username_exists(&self.auth.admin_username).await? {
            accounts.push((
                self.auth.admin_username.clone(),
                self.hasher.hash(&self.auth.admin_password)?,
            ));
        }
        if !self.repository.users.username_exists(&self.auth.guest_username).await? {
            // Guest signs in without a password; store an unguessable one
            accounts.push((
                self.auth.guest_username.clone(),
                self.hasher.hash(&Uuid::new_v4().to_string())?,
            ));
        }

        let outcome = self
            .repository
            .setup
            .provision(&accounts, &self.config.seed_clients)
            .await?;

        if outcome.is_noop() {
            tracing::info!("Setup: data already exists, nothing created");
        } else {
            tracing::info!(
                usuarios = outcome.usuarios,
                clientes = outcome.clientes,
                "Setup: provisioning completed"
            );
        }
        Ok(outcome)
    }
}
