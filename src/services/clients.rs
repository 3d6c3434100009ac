//! Clients service

use validator::Validate;

use crate::{
    error::AppResult,
    models::client::{Client, ClientShort, CreateClient},
    repository::Repository,
};

#[derive(Clone)]
pub struct ClientsService {
    repository: Repository,
}

impl ClientsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_short(&self) -> AppResult<Vec<ClientShort>> {
        self.repository.clients.list_short().await
    }

    pub async fn find(&self, id: i32) -> AppResult<Option<Client>> {
        self.repository.clients.find(id).await
    }

    pub async fn create(&self, mut data: CreateClient) -> AppResult<Client> {
        data.nombre = data.nombre.trim().to_string();
        data.validate()?;
        if data.direccion.as_deref().is_some_and(|d| d.trim().is_empty()) {
            data.direccion = None;
        }

        let client = self.repository.clients.create(&data).await?;
        tracing::info!(id = client.id, nombre = %client.nombre, "Client created");
        Ok(client)
    }

    /// Refused while the client still owns equipment
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.clients.delete(id).await?;
        tracing::info!(id, "Client deleted");
        Ok(())
    }
}
