//! Equipment repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment in insertion order, optionally for a single client
    pub async fn list(&self, cliente_id: Option<i32>) -> AppResult<Vec<Equipment>> {
        let rows = match cliente_id {
            Some(id) => {
                sqlx::query_as::<_, Equipment>(
                    "SELECT * FROM equipos WHERE cliente_id = $1 ORDER BY id",
                )
                .bind(id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Equipment>("SELECT * FROM equipos ORDER BY id")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipos WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Check if a serial is already registered (optionally ignoring one row)
    pub async fn serial_exists(&self, serial: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipos WHERE serial = $1 AND id != $2)")
                .bind(serial)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipos WHERE serial = $1)")
                .bind(serial)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Create equipment
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipos (cliente_id, nombre, tipo, serial, ubicacion, observaciones, foto)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.cliente_id)
        .bind(&data.nombre)
        .bind(&data.tipo)
        .bind(&data.serial)
        .bind(&data.ubicacion)
        .bind(&data.observaciones)
        .bind(&data.foto)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update the supplied fields only
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let now = Utc::now();
        let mut sets = vec!["modif_date = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.cliente_id, "cliente_id");
        add_field!(data.nombre, "nombre");
        add_field!(data.tipo, "tipo");
        add_field!(data.serial, "serial");
        add_field!(data.ubicacion, "ubicacion");
        add_field!(data.estado, "estado");
        add_field!(data.observaciones, "observaciones");
        add_field!(data.foto, "foto");

        let query = format!(
            "UPDATE equipos SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.cliente_id);
        bind_field!(data.nombre);
        bind_field!(data.tipo);
        bind_field!(data.serial);
        bind_field!(data.ubicacion);
        bind_field!(data.estado);
        bind_field!(data.observaciones);
        bind_field!(data.foto);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment and its maintenance log in one transaction.
    /// Returns the number of maintenance events removed.
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;

        let events = sqlx::query("DELETE FROM mantenimientos WHERE equipo_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let result = sqlx::query("DELETE FROM equipos WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }

        tx.commit().await?;
        Ok(events)
    }
}
