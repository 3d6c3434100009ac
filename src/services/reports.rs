//! Report generation service

use crate::{
    error::{AppError, AppResult},
    report::{self, ReportHeading},
    repository::Repository,
};

#[derive(Clone)]
pub struct ReportService {
    repository: Repository,
}

impl ReportService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Report for one client, or for the whole fleet when the scope is
    /// absent or does not resolve. Read-only.
    pub async fn generate(&self, cliente_id: Option<i32>) -> AppResult<Vec<u8>> {
        let client = match cliente_id {
            Some(id) => self.repository.clients.find(id).await?,
            None => None,
        };

        let (heading, items) = match client {
            Some(client) => {
                let items = self.repository.equipment.list(Some(client.id)).await?;
                (ReportHeading::for_client(&client), items)
            }
            None => (ReportHeading::global(), self.repository.equipment.list(None).await?),
        };

        let count = items.len();
        let bytes = tokio::task::spawn_blocking(move || report::render(&heading, &items))
            .await
            .map_err(|e| AppError::Internal(format!("Report task failed: {}", e)))??;

        tracing::info!(cliente_id = ?cliente_id, equipos = count, bytes = bytes.len(), "Report generated");
        Ok(bytes)
    }
}
