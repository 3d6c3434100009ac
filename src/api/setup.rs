//! First-run provisioning endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, repository::setup::SetupOutcome};

#[derive(Serialize, ToSchema)]
pub struct SetupResponse {
    pub mensaje: String,
    /// Rows created by this run
    pub creados: SetupOutcome,
}

/// Provision admin, guest and seed clients. Safe to call repeatedly.
#[utoipa::path(
    get,
    path = "/setup-fase2",
    tag = "setup",
    responses(
        (status = 200, description = "Provisioning outcome", body = SetupResponse)
    )
)]
pub async fn setup(State(state): State<crate::AppState>) -> AppResult<Json<SetupResponse>> {
    let outcome = state.services.setup.run().await?;
    let mensaje = if outcome.is_noop() {
        "La base de datos ya existe. No se hicieron cambios."
    } else {
        "Usuarios y clientes iniciales creados."
    };
    Ok(Json(SetupResponse {
        mensaje: mensaje.to_string(),
        creados: outcome,
    }))
}
