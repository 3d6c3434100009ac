//! Login, guest login and logout

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{
    error::{AppError, AppResult},
    models::user::{Identity, LoginForm},
    AppState,
};

use super::views::login_page;

fn start_session(state: &AppState, jar: CookieJar, identity: Identity) -> Response {
    let session_id = state.services.auth.open_session(identity);
    let cookie = Cookie::build((state.services.auth.cookie_name().to_string(), session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), Redirect::to("/")).into_response()
}

/// Form login; re-renders the form on bad credentials
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    match state.services.auth.authenticate(&form.username, &form.password).await {
        Ok(identity) => Ok(start_session(&state, jar, identity)),
        Err(AppError::Authentication(msg)) => {
            tracing::warn!(username = %form.username, "Failed login attempt");
            login_page(StatusCode::UNAUTHORIZED, Some(msg))
        }
        Err(e) => Err(e),
    }
}

/// Passwordless login as the read-only guest
pub async fn guest_login(State(state): State<AppState>, jar: CookieJar) -> AppResult<Response> {
    match state.services.auth.authenticate_as_guest().await {
        Ok(identity) => Ok(start_session(&state, jar, identity)),
        Err(AppError::Authentication(msg)) => login_page(StatusCode::SERVICE_UNAVAILABLE, Some(msg)),
        Err(e) => Err(e),
    }
}

/// Drop the server-side session and the cookie
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let name = state.services.auth.cookie_name().to_string();
    if let Some(cookie) = jar.get(&name) {
        state.services.auth.close_session(cookie.value());
    }
    let jar = jar.remove(Cookie::build((name, "")).path("/"));
    (jar, Redirect::to("/login"))
}
