use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::notification::ReminderDto,
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::auth::{AuthRule, TargetType},
        service::reminder::ReminderService,
        state::AppState,
    },
};

/// Adds or replaces the user's vote reminder for an entity.
///
/// `PUT /users/{user_id}/{target_type}/{target_id}/reminders`
///
/// # Access Control
/// - The user named in the path
///
/// # Returns
/// - `204 No Content` - Reminder stored; an "Added Reminder" push is queued
/// - `404 Not Found` - Unknown entity
pub async fn put_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((user_id, target_type, target_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let target_type: TargetType = target_type.parse()?;
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&AuthRule::user(&user_id))
        .await?;

    ReminderService::new(&state.db, &state.config, &state.push_tx)
        .add(&user_id, target_type, &target_id, Utc::now())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /users/{user_id}/{target_type}/{target_id}/reminders`
///
/// # Returns
/// - `204 No Content` - Reminder removed
/// - `404 Not Found` - The user had no reminder for the entity
pub async fn delete_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((user_id, target_type, target_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let target_type: TargetType = target_type.parse()?;
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&AuthRule::user(&user_id))
        .await?;

    ReminderService::new(&state.db, &state.config, &state.push_tx)
        .delete(&user_id, target_type, &target_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /users/{user_id}/reminders`
///
/// The user's reminders with the entity name and avatar where they still resolve.
pub async fn get_reminders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&AuthRule::user(&user_id))
        .await?;

    let reminders: Vec<ReminderDto> = ReminderService::new(&state.db, &state.config, &state.push_tx)
        .list(&user_id)
        .await?
        .into_iter()
        .map(|(reminder, info)| match info {
            Some(info) => reminder.into_dto(Some(info.name), Some(info.avatar)),
            None => reminder.into_dto(None, None),
        })
        .collect();

    Ok((StatusCode::OK, Json(reminders)))
}
