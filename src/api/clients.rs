//! Client endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::client::{Client, ClientShort, CreateClient},
};

use super::{ApiJson, AuthenticatedUser, MessageResponse, WriterUser};

/// List clients
#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "clientes",
    responses(
        (status = 200, description = "Client list", body = Vec<ClientShort>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_clients(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_identity): AuthenticatedUser,
) -> AppResult<Json<Vec<ClientShort>>> {
    let clients = state.services.clients.list_short().await?;
    Ok(Json(clients))
}

/// Create a client
#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "clientes",
    request_body = CreateClient,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Missing or invalid field"),
        (status = 403, description = "Read-only account")
    )
)]
pub async fn create_client(
    State(state): State<crate::AppState>,
    WriterUser(_identity): WriterUser,
    ApiJson(data): ApiJson<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let client = state.services.clients.create(data).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Delete a client that owns no equipment
#[utoipa::path(
    delete,
    path = "/api/clientes/{id}",
    tag = "clientes",
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client deleted", body = MessageResponse),
        (status = 400, description = "Client still owns equipment"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn delete_client(
    State(state): State<crate::AppState>,
    WriterUser(_identity): WriterUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.clients.delete(id).await?;
    Ok(Json(MessageResponse::new("Cliente eliminado")))
}
