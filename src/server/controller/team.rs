use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    model::team::{CreateTeamDto, PatchMemberPermsDto},
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::auth::{AuthRule, TargetType},
        service::team::TeamService,
        state::AppState,
    },
};

/// Creates a team owned by the caller.
///
/// `POST /teams`
///
/// # Access Control
/// - Any authenticated user
///
/// # Returns
/// - `201 Created` - `TeamDto`; the caller is a `global.*` member
/// - `400 Bad Request` - Empty name
pub async fn create_team(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateTeamDto>,
) -> Result<impl IntoResponse, AppError> {
    let auth = AuthGuard::new(&state.db, &headers)
        .require(&AuthRule::any_user())
        .await?;

    let (team, _) = TeamService::new(&state.db)
        .create(&auth.id, &payload.name, payload.avatar, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(team.into_dto())))
}

/// Replaces a member's permission flags.
///
/// `PATCH /teams/{team_id}/members/{member_id}/perms`
///
/// # Access Control
/// - A member with `team_member.edit`, or the team's own token
/// - Only permissions the caller holds may be added or removed
///
/// # Returns
/// - `200 OK` - `TeamMemberDto` with the stored, resolved flags
/// - `400 Bad Request` - A malformed permission string
/// - `403 Forbidden` - Missing `team_member.edit` or a permission the caller lacks
/// - `404 Not Found` - No such member
/// - `409 Conflict` - The team would be left without a `global.*` member
pub async fn patch_member_perms(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((team_id, member_id)): Path<(Uuid, String)>,
    Json(payload): Json<PatchMemberPermsDto>,
) -> Result<impl IntoResponse, AppError> {
    let team = team_id.to_string();
    let auth = AuthGuard::new(&state.db, &headers)
        .require(&AuthRule::any_user().or(TargetType::Team, Some(&team)))
        .await?;

    let member = TeamService::new(&state.db)
        .patch_member_perms(&auth, team_id, &member_id, payload.perms)
        .await?;

    Ok((StatusCode::OK, Json(member.into_dto())))
}
