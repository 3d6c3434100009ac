//! User management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::user::{CreateUser, UserShort},
};

use super::{ApiJson, MessageResponse, WriterUser};

/// List users
#[utoipa::path(
    get,
    path = "/api/usuarios",
    tag = "usuarios",
    responses(
        (status = 200, description = "List of users", body = Vec<UserShort>),
        (status = 403, description = "Read-only account")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    WriterUser(_identity): WriterUser,
) -> AppResult<Json<Vec<UserShort>>> {
    let users = state.services.users.list().await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/usuarios",
    tag = "usuarios",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserShort),
        (status = 400, description = "Invalid input or username already exists")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    WriterUser(_identity): WriterUser,
    ApiJson(user): ApiJson<CreateUser>,
) -> AppResult<(StatusCode, Json<UserShort>)> {
    let created = state.services.users.create(user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/usuarios/{id}",
    tag = "usuarios",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 403, description = "Reserved account or own account"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    WriterUser(identity): WriterUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.users.delete(&identity, id).await?;
    Ok(Json(MessageResponse::new("Usuario eliminado")))
}
