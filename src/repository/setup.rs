//! Idempotent provisioning of reserved accounts and seed clients

use serde::Serialize;
use sqlx::{Pool, Postgres};
use utoipa::ToSchema;

use crate::{config::SeedClient, error::AppResult};

/// Rows actually inserted by a provisioning run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SetupOutcome {
    pub usuarios: u64,
    pub clientes: u64,
}

impl SetupOutcome {
    pub fn is_noop(&self) -> bool {
        self.usuarios == 0 && self.clientes == 0
    }
}

#[derive(Clone)]
pub struct SetupRepository {
    pool: Pool<Postgres>,
}

impl SetupRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Cheap connectivity probe
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Insert missing accounts (username, password hash) and, when the client
    /// table is empty, the seed clients. Everything commits or nothing does.
    pub async fn provision(
        &self,
        accounts: &[(String, String)],
        seeds: &[SeedClient],
    ) -> AppResult<SetupOutcome> {
        let mut tx = self.pool.begin().await?;
        let mut outcome = SetupOutcome::default();

        // Serializes concurrent first runs; the lock conflicts with itself
        // and is held until commit, so only one run can see an empty table.
        sqlx::query("LOCK TABLE clientes IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        for (username, password_hash) in accounts {
            outcome.usuarios += sqlx::query(
                "INSERT INTO usuarios (username, password_hash) VALUES ($1, $2) ON CONFLICT (username) DO NOTHING",
            )
            .bind(username)
            .bind(password_hash)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        let has_clients: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clientes)")
            .fetch_one(&mut *tx)
            .await?;
        if !has_clients {
            for seed in seeds {
                outcome.clientes += sqlx::query("INSERT INTO clientes (nombre, direccion) VALUES ($1, $2)")
                    .bind(&seed.nombre)
                    .bind(&seed.direccion)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected();
            }
        }

        tx.commit().await?;
        Ok(outcome)
    }
}
