use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::{
    model::auth::LoginRequestDto,
    server::{
        controller::user_agent,
        error::AppError,
        service::auth::{authorize_info, AuthService},
        state::AppState,
    },
};

/// Exchanges a Discord authorization code for a login session.
///
/// `POST /auth/login/discord-oauth2`
///
/// # Access Control
/// - Public; rate limited per client IP
///
/// # Returns
/// - `200 OK` - `LoginResponseDto` with the session token
/// - `400 Bad Request` - Outdated client, invalid fields or a reused code
/// - `403 Forbidden` - Banned user, or `ban_exempt` requested by a user in good standing
/// - `502 Bad Gateway` - Discord rejected the exchange or the user lookup
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let response = AuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.config,
        state.code_cache.as_ref(),
    )
    .login(payload, user_agent(&headers), Utc::now())
    .await?;

    Ok((StatusCode::OK, Json(response)))
}

/// `GET /authorize/info`
///
/// Client id and protocol a client needs to start the OAuth2 flow.
pub async fn get_authorize_info(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(authorize_info(&state.config))))
}
