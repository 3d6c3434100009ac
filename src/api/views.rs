//! HTML views: login page and dashboard

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    error::{AppError, AppResult},
    models::{
        client::{Client, ClientFilter, ClientShort},
        equipment::Equipment,
    },
};

use super::ViewUser;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub is_guest: bool,
    pub clients: Vec<ClientShort>,
    pub current: Option<Client>,
    /// Selected client id, 0 when showing every client
    pub selected_id: i32,
    pub equipment: Vec<Equipment>,
}

pub(super) fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(format!("Template error: {}", e)))
}

/// Login page, optionally with an error message
pub(super) fn login_page(status: StatusCode, error: Option<String>) -> AppResult<Response> {
    Ok((status, render(&LoginTemplate { error })?).into_response())
}

pub async fn login_form() -> AppResult<Response> {
    login_page(StatusCode::OK, None)
}

/// Dashboard listing equipment, optionally filtered by client
pub async fn dashboard(
    State(state): State<crate::AppState>,
    ViewUser(identity): ViewUser,
    Query(filter): Query<ClientFilter>,
) -> AppResult<Html<String>> {
    let clients = state.services.clients.list_short().await?;
    // An unknown client id shows every client, like the report does
    let current = match filter.cliente_id {
        Some(id) => state.services.clients.find(id).await?,
        None => None,
    };
    let equipment = state
        .services
        .equipment
        .list(current.as_ref().map(|c| c.id))
        .await?;

    render(&DashboardTemplate {
        is_guest: identity.is_guest(),
        username: identity.username,
        clients,
        selected_id: current.as_ref().map(|c| c.id).unwrap_or(0),
        current,
        equipment,
    })
}
