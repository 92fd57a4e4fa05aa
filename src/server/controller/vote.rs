use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::server::{
    controller::param::VoteParam,
    error::AppError,
    middleware::auth::AuthGuard,
    model::auth::{AuthRule, TargetType},
    service::vote::{publish_vote, VoteService},
    state::AppState,
};

/// Whether the user may vote for the entity right now.
///
/// `GET /users/{user_id}/{target_type}/{target_id}/votes`
///
/// # Access Control
/// - The user named in the path
///
/// # Returns
/// - `200 OK` - `UserVoteDto` with the active votes and the remaining wait
pub async fn get_user_votes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((user_id, target_type, target_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let target_type: TargetType = target_type.parse()?;
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&AuthRule::user(&user_id))
        .await?;

    let status = VoteService::new(&state.db, &state.config)
        .status(&user_id, target_type, &target_id, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(status.into_dto())))
}

/// Casts a vote.
///
/// `PUT /users/{user_id}/{target_type}/{target_id}/votes?upvote=`
///
/// The vote log message and webhooks run after the response is decided and never fail
/// the request.
///
/// # Access Control
/// - The user named in the path; vote-banned users are refused
///
/// # Returns
/// - `204 No Content` - Vote recorded
/// - `400 Bad Request` - Cooldown still running, unsupported direction or entity not votable
/// - `403 Forbidden` - The user is vote banned
/// - `404 Not Found` - Unknown entity
pub async fn put_user_vote(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((user_id, target_type, target_id)): Path<(String, String, String)>,
    Query(param): Query<VoteParam>,
) -> Result<impl IntoResponse, AppError> {
    let target_type: TargetType = target_type.parse()?;
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&AuthRule::user(&user_id))
        .await?;

    let vote = VoteService::new(&state.db, &state.config)
        .cast(&user_id, target_type, &target_id, param.upvote, Utc::now())
        .await?;

    tokio::spawn(publish_vote(
        state.db.clone(),
        state.http_client.clone(),
        state.discord.clone(),
        state.config.vote_log_channel_id,
        vote,
    ));

    Ok(StatusCode::NO_CONTENT)
}
