//! Business logic services

pub mod auth;
pub mod clients;
pub mod credentials;
pub mod equipment;
pub mod maintenance;
pub mod reports;
pub mod setup;
pub mod users;

use std::sync::Arc;

use crate::{config::AppConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub clients: clients::ClientsService,
    pub equipment: equipment::EquipmentService,
    pub maintenance: maintenance::MaintenanceService,
    pub users: users::UsersService,
    pub setup: setup::SetupService,
    pub reports: reports::ReportService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> AppResult<Self> {
        let hasher: Arc<dyn credentials::CredentialHasher> =
            Arc::new(credentials::Argon2Hasher::default());

        Ok(Self {
            auth: auth::AuthService::new(repository.clone(), hasher.clone(), config.auth.clone()),
            clients: clients::ClientsService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            maintenance: maintenance::MaintenanceService::new(
                repository.clone(),
                &config.maintenance,
            )?,
            users: users::UsersService::new(repository.clone(), hasher.clone(), config.auth.clone()),
            setup: setup::SetupService::new(
                repository.clone(),
                hasher,
                config.auth.clone(),
                config.setup.clone(),
            ),
            reports: reports::ReportService::new(repository),
        })
    }
}
