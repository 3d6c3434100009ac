//! Maintenance log endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::maintenance::{CreateMaintenance, Maintenance},
};

use super::{ApiJson, AuthenticatedUser, WriterUser};

/// Maintenance history of an equipment, newest first
#[utoipa::path(
    get,
    path = "/api/mantenimientos/{equipo_id}",
    tag = "mantenimientos",
    params(("equipo_id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Events, newest first", body = Vec<Maintenance>),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn list_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_identity): AuthenticatedUser,
    Path(equipo_id): Path<i32>,
) -> AppResult<Json<Vec<Maintenance>>> {
    let events = state.services.maintenance.list(equipo_id).await?;
    Ok(Json(events))
}

/// Log a maintenance event as the current user
#[utoipa::path(
    post,
    path = "/api/mantenimientos",
    tag = "mantenimientos",
    request_body = CreateMaintenance,
    responses(
        (status = 201, description = "Event logged", body = Maintenance),
        (status = 403, description = "Read-only account"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn create_maintenance(
    State(state): State<crate::AppState>,
    WriterUser(identity): WriterUser,
    ApiJson(data): ApiJson<CreateMaintenance>,
) -> AppResult<(StatusCode, Json<Maintenance>)> {
    let event = state.services.maintenance.create(&identity, data).await?;
    Ok((StatusCode::CREATED, Json(event)))
}
