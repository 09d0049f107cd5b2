//! Session cookie endpoints

use axum::{extract::State, Json};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar, WithRejection,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{JsonMap, SessionClaims},
    services::auth::TOKEN_COOKIE,
    AppState,
};

use super::SessionUser;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub success: bool,
}

/// Issue a session token for the posted user object (any JSON object, typically `{email}`)
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "auth",
    request_body = Object,
    responses(
        (status = 200, description = "Session cookie set", body = SessionResponse),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ErrorResponse)
    )
)]
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(user), _): WithRejection<Json<JsonMap>, AppError>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    let config = state.services.auth.config();
    let token = state.services.auth.issue_token(user)?;
    tracing::info!("Session token issued");

    let cookie = Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(config.http_only_cookie)
        .secure(config.secure_cookie)
        .same_site(SameSite::None);

    Ok((jar.add(cookie), Json(SessionResponse { success: true })))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookie cleared", body = SessionResponse)
    )
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<SessionResponse>) {
    tracing::info!("Logging out");
    // Added rather than removed so the expiry is sent even without a cookie in the request
    let mut cookie = Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .same_site(SameSite::None)
        .build();
    cookie.make_removal();
    (jar.add(cookie), Json(SessionResponse { success: true }))
}

/// Decoded payload of the current session
#[utoipa::path(
    get,
    path = "/session",
    tag = "auth",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Current session claims"),
        (status = 401, description = "Missing, invalid or expired token", body = crate::error::ErrorResponse)
    )
)]
pub async fn current_session(SessionUser(claims): SessionUser) -> Json<SessionClaims> {
    Json(claims)
}
