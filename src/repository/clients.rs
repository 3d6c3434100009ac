//! Clients repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, ClientShort, CreateClient},
};

#[derive(Clone)]
pub struct ClientsRepository {
    pool: Pool<Postgres>,
}

impl ClientsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List id/name pairs in creation order
    pub async fn list_short(&self) -> AppResult<Vec<ClientShort>> {
        let rows = sqlx::query_as::<_, ClientShort>("SELECT id, nombre FROM clientes ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Find a client, `None` if the id does not resolve
    pub async fn find(&self, id: i32) -> AppResult<Option<Client>> {
        let row = sqlx::query_as::<_, Client>("SELECT * FROM clientes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clientes WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn create(&self, data: &CreateClient) -> AppResult<Client> {
        let row = sqlx::query_as::<_, Client>(
            "INSERT INTO clientes (nombre, direccion) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.nombre)
        .bind(&data.direccion)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete a client that owns no equipment
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        // Lock the row so no equipment can be attached while we check
        let found: Option<i32> = sqlx::query_scalar("SELECT id FROM clientes WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Err(AppError::NotFound(format!("Client {} not found", id)));
        }

        let owned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipos WHERE cliente_id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if owned > 0 {
            return Err(AppError::Conflict(format!(
                "Client {} still owns {} equipment",
                id, owned
            )));
        }

        sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
