//! Equipment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        client::ClientFilter,
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
    },
};

use super::{ApiJson, AuthenticatedUser, MessageResponse, WriterUser};

/// List equipment, optionally for one client
#[utoipa::path(
    get,
    path = "/api/equipos",
    tag = "equipos",
    params(ClientFilter),
    responses(
        (status = 200, description = "Equipment list in creation order", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_identity): AuthenticatedUser,
    Query(filter): Query<ClientFilter>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.list(filter.cliente_id).await?;
    Ok(Json(equipment))
}

/// Get one equipment
#[utoipa::path(
    get,
    path = "/api/equipos/{id}",
    tag = "equipos",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_identity): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Register equipment for a client
#[utoipa::path(
    post,
    path = "/api/equipos",
    tag = "equipos",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Missing field, duplicate serial or unknown client"),
        (status = 403, description = "Read-only account")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    WriterUser(_identity): WriterUser,
    ApiJson(data): ApiJson<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let equipment = state.services.equipment.create(data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment; omitted fields keep their value
#[utoipa::path(
    put,
    path = "/api/equipos/{id}",
    tag = "equipos",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 400, description = "Invalid field, duplicate serial or unknown client"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    WriterUser(_identity): WriterUser,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(id, data).await?;
    Ok(Json(equipment))
}

/// Delete equipment and its maintenance log
#[utoipa::path(
    delete,
    path = "/api/equipos/{id}",
    tag = "equipos",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment deleted", body = MessageResponse),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    WriterUser(_identity): WriterUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.equipment.delete(id).await?;
    Ok(Json(MessageResponse::new("Equipo eliminado")))
}
