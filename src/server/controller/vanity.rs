use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use chrono::Utc;

use crate::server::{
    controller::param::VanityParam,
    error::AppError,
    middleware::auth::AuthGuard,
    model::auth::{AuthRule, TargetType},
    service::vanity::VanityService,
    state::AppState,
};

/// Sets the vanity code of a bot, server or team.
///
/// `PATCH /users/{user_id}/vanity/{target_id}?target_type=&vanity=`
///
/// # Access Control
/// - The user named in the path, holding `<target_type>.set_vanity`
///
/// # Returns
/// - `204 No Content` - Code stored
/// - `400 Bad Request` - Unsupported target type or unusable code
/// - `403 Forbidden` - Missing permission
/// - `409 Conflict` - Another entity uses the code
pub async fn patch_vanity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((user_id, target_id)): Path<(String, String)>,
    Query(param): Query<VanityParam>,
) -> Result<impl IntoResponse, AppError> {
    let target_type: TargetType = param.target_type.parse()?;
    let auth = AuthGuard::new(&state.db, &headers)
        .require(&AuthRule::user(&user_id))
        .await?;

    VanityService::new(&state.db)
        .set(&auth, target_type, &target_id, &param.vanity, Utc::now())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
