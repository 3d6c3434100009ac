//! HTTP handlers: JSON API, HTML views and report download

pub mod auth;
pub mod clients;
pub mod equipment;
pub mod health;
pub mod maintenance;
pub mod openapi;
pub mod reports;
pub mod setup;
pub mod users;
pub mod views;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::user::{Capability, Identity},
    AppState,
};

/// JSON body extractor whose rejections become 400 validation errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Plain confirmation body
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub mensaje: String,
}

impl MessageResponse {
    pub fn new(mensaje: impl Into<String>) -> Self {
        Self {
            mensaje: mensaje.into(),
        }
    }
}

fn session_identity(parts: &Parts, state: &AppState) -> Option<Identity> {
    let jar = CookieJar::from_headers(&parts.headers);
    let cookie = jar.get(state.services.auth.cookie_name())?;
    state.services.auth.resolve_session(cookie.value())
}

/// Any authenticated identity (read capability)
pub struct AuthenticatedUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = session_identity(parts, state)
            .ok_or_else(|| AppError::Authentication("Login required".to_string()))?;
        identity.require(Capability::Read)?;
        Ok(AuthenticatedUser(identity))
    }
}

/// Authenticated identity allowed to mutate the store; guests are refused
/// here, before the handler runs.
pub struct WriterUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for WriterUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = session_identity(parts, state)
            .ok_or_else(|| AppError::Authentication("Login required".to_string()))?;
        identity.require(Capability::Write)?;
        Ok(WriterUser(identity))
    }
}

/// Authenticated identity for browser views; anonymous users go to the login page
pub struct ViewUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for ViewUser {
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        session_identity(parts, state)
            .map(ViewUser)
            .ok_or_else(|| Redirect::to("/login"))
    }
}
