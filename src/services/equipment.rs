//! Equipment service

use base64::{engine::general_purpose::STANDARD, Engine as _};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
    repository::Repository,
};

/// Accept `data:image/<type>;base64,<payload>` with a decodable payload
pub fn validate_photo(foto: &str) -> AppResult<()> {
    let invalid = || AppError::Validation("foto must be a base64 image data URL".to_string());

    let (meta, payload) = foto.split_once(',').ok_or_else(invalid)?;
    if !meta.starts_with("data:image/") || !meta.ends_with(";base64") {
        return Err(invalid());
    }
    STANDARD.decode(payload.trim()).map_err(|_| invalid())?;
    Ok(())
}

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, cliente_id: Option<i32>) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(cliente_id).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, mut data: CreateEquipment) -> AppResult<Equipment> {
        data.normalize();
        data.validate()?;
        if let Some(foto) = data.foto.as_deref().filter(|f| !f.is_empty()) {
            validate_photo(foto)?;
        }

        if !self.repository.clients.exists(data.cliente_id).await? {
            return Err(AppError::Conflict(format!(
                "Client {} does not exist",
                data.cliente_id
            )));
        }
        if self.repository.equipment.serial_exists(&data.serial, None).await? {
            return Err(AppError::Conflict(format!(
                "Serial {} already registered",
                data.serial
            )));
        }

        let equipment = self.repository.equipment.create(&data).await?;
        tracing::info!(id = equipment.id, serial = %equipment.serial, "Equipment created");
        Ok(equipment)
    }

    pub async fn update(&self, id: i32, mut data: UpdateEquipment) -> AppResult<Equipment> {
        data.normalize();
        data.validate()?;
        if let Some(foto) = data.foto.as_deref().filter(|f| !f.is_empty()) {
            validate_photo(foto)?;
        }

        if !self.repository.equipment.exists(id).await? {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        if let Some(cliente_id) = data.cliente_id {
            if !self.repository.clients.exists(cliente_id).await? {
                return Err(AppError::Conflict(format!("Client {} does not exist", cliente_id)));
            }
        }
        if let Some(ref serial) = data.serial {
            if self.repository.equipment.serial_exists(serial, Some(id)).await? {
                return Err(AppError::Conflict(format!("Serial {} already registered", serial)));
            }
        }

        let equipment = self.repository.equipment.update(id, &data).await?;
        tracing::info!(id, "Equipment updated");
        Ok(equipment)
    }

    /// Delete equipment together with its maintenance log
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let events = self.repository.equipment.delete(id).await?;
        tracing::info!(id, maintenance_removed = events, "Equipment deleted");
        Ok(())
    }
}
