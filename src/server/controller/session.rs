use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    model::session::{CreateSessionDto, CreatedSessionDto, SessionDto},
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            auth::{AuthRule, TargetType, SCOPE_BAN_EXEMPT},
            session::NewApiSession,
        },
        service::session::SessionService,
        state::AppState,
    },
};

/// Users act through their entity permissions; an entity may act on itself with its own
/// token or session.
fn session_rule(target_type: TargetType, target_id: &str) -> AuthRule {
    if target_type == TargetType::User {
        AuthRule::any_user()
    } else {
        AuthRule::any_user().or(target_type, Some(target_id))
    }
}

/// Creates an API session for an entity.
///
/// `POST /sessions/{target_type}/{target_id}`
///
/// # Access Control
/// - Requires `<target_type>.create_session` on the entity
/// - Callers without `global.*` must send `perm_limits` they hold themselves
///
/// # Returns
/// - `201 Created` - `CreatedSessionDto`; the token is only ever returned here
/// - `400 Bad Request` - Missing name, wrong type or non-positive expiry
/// - `401 Unauthorized` - Missing or invalid credentials
/// - `403 Forbidden` - Missing permission or disallowed `perm_limits`
pub async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((target_type, target_id)): Path<(String, String)>,
    Json(payload): Json<CreateSessionDto>,
) -> Result<impl IntoResponse, AppError> {
    let target_type: TargetType = target_type.parse()?;
    let auth = AuthGuard::new(&state.db, &headers)
        .require(&session_rule(target_type, &target_id))
        .await?;

    let created = SessionService::new(&state.db)
        .create_api(
            &auth,
            target_type,
            &target_id,
            NewApiSession {
                name: payload.name,
                session_type: payload.session_type,
                perm_limits: payload.perm_limits,
                expiry_secs: payload.expiry,
            },
            Utc::now(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedSessionDto {
            token: created.token,
            session_id: created.id.to_string(),
        }),
    ))
}

/// Lists the sessions of an entity without their tokens.
///
/// `GET /sessions/{target_type}/{target_id}`
///
/// # Access Control
/// - Requires `<target_type>.view_session`; `ban_exempt` sessions are accepted
pub async fn get_sessions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((target_type, target_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let target_type: TargetType = target_type.parse()?;
    let auth = AuthGuard::new(&state.db, &headers)
        .require(&session_rule(target_type, &target_id).scope(SCOPE_BAN_EXEMPT))
        .await?;

    let sessions: Vec<SessionDto> = SessionService::new(&state.db)
        .list(&auth, target_type, &target_id)
        .await?
        .into_iter()
        .map(|session| session.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(sessions)))
}

/// Revokes one session of an entity.
///
/// `DELETE /sessions/{target_type}/{target_id}/{session_id}`
///
/// # Access Control
/// - Requires `<target_type>.revoke_session`; `ban_exempt` sessions are accepted
///
/// # Returns
/// - `204 No Content` - Session deleted
/// - `404 Not Found` - No session of this entity has that id
pub async fn revoke_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((target_type, target_id, session_id)): Path<(String, String, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let target_type: TargetType = target_type.parse()?;
    let auth = AuthGuard::new(&state.db, &headers)
        .require(&session_rule(target_type, &target_id).scope(SCOPE_BAN_EXEMPT))
        .await?;

    SessionService::new(&state.db)
        .revoke(&auth, target_type, &target_id, session_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
