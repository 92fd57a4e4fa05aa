use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::api::PermissionsDto,
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::auth::{AuthRule, TargetType},
        service::entity_perms::EntityPermissionService,
        state::AppState,
    },
};

/// The caller's resolved permissions on an entity, after session limits.
///
/// `GET /entity-perms/{target_type}/{target_id}`
///
/// # Access Control
/// - Any authenticated user
///
/// # Returns
/// - `200 OK` - `PermissionsDto`, empty when the caller holds nothing
/// - `400 Bad Request` - Target type that cannot hold permissions
pub async fn get_entity_perms(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((target_type, target_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let target_type: TargetType = target_type.parse()?;
    let auth = AuthGuard::new(&state.db, &headers)
        .require(&AuthRule::any_user())
        .await?;

    let perms = EntityPermissionService::new(&state.db)
        .effective_perms(&auth, target_type, &target_id)
        .await?;

    Ok((StatusCode::OK, Json(PermissionsDto { perms })))
}

/// `GET /users/{user_id}/staff-perms`
///
/// Staff permissions of the user, resolved from positions and overrides. Empty for
/// non-staff.
pub async fn get_staff_perms(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&AuthRule::user(&user_id))
        .await?;

    let perms = EntityPermissionService::new(&state.db)
        .staff_perms(&user_id)
        .await?;

    Ok((StatusCode::OK, Json(PermissionsDto { perms })))
}
