//! Maintenance log service

use chrono::{FixedOffset, NaiveDateTime, Utc};
use validator::Validate;

use crate::{
    config::MaintenanceConfig,
    error::{AppError, AppResult},
    models::{
        maintenance::{CreateMaintenance, Maintenance},
        user::Identity,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
    offset: FixedOffset,
}

impl MaintenanceService {
    pub fn new(repository: Repository, config: &MaintenanceConfig) -> AppResult<Self> {
        let offset = FixedOffset::east_opt(config.utc_offset_hours * 3600).ok_or_else(|| {
            AppError::Internal(format!(
                "Invalid maintenance UTC offset: {} hours",
                config.utc_offset_hours
            ))
        })?;
        Ok(Self { repository, offset })
    }

    /// Current civil time in the configured zone
    pub fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.offset).naive_local()
    }

    /// Events of an equipment, newest first
    pub async fn list(&self, equipo_id: i32) -> AppResult<Vec<Maintenance>> {
        if !self.repository.equipment.exists(equipo_id).await? {
            return Err(AppError::NotFound(format!("Equipment {} not found", equipo_id)));
        }
        self.repository.maintenance.list_for_equipment(equipo_id).await
    }

    /// Log an event on behalf of `actor`
    pub async fn create(&self, actor: &Identity, mut data: CreateMaintenance) -> AppResult<Maintenance> {
        data.normalize();
        data.validate()?;
        if !self.repository.equipment.exists(data.equipo_id).await? {
            return Err(AppError::NotFound(format!("Equipment {} not found", data.equipo_id)));
        }

        let event = self
            .repository
            .maintenance
            .create(data.equipo_id, self.now(), &data.descripcion, &actor.username)
            .await?;
        tracing::info!(id = event.id, equipo_id = event.equipo_id, user = %actor.username, "Maintenance logged");
        Ok(event)
    }
}
