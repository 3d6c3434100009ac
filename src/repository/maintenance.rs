//! Maintenance events repository

use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::maintenance::Maintenance};

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Events of one equipment, newest first
    pub async fn list_for_equipment(&self, equipo_id: i32) -> AppResult<Vec<Maintenance>> {
        let rows = sqlx::query_as::<_, Maintenance>(
            "SELECT * FROM mantenimientos WHERE equipo_id = $1 ORDER BY fecha DESC, id DESC",
        )
        .bind(equipo_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create(
        &self,
        equipo_id: i32,
        fecha: NaiveDateTime,
        descripcion: &str,
        usuario: &str,
    ) -> AppResult<Maintenance> {
        let row = sqlx::query_as::<_, Maintenance>(
            r#"
            INSERT INTO mantenimientos (equipo_id, fecha, descripcion, usuario)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(equipo_id)
        .bind(fecha)
        .bind(descripcion)
        .bind(usuario)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
