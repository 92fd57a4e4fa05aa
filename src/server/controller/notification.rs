use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::notification::{CreateSubscriptionDto, NotificationInfoDto, SubscriptionDto},
    server::{
        controller::{param::NotifIdParam, user_agent},
        error::AppError,
        middleware::auth::AuthGuard,
        model::auth::AuthRule,
        service::notification::{NewSubscription, NotificationService},
        state::AppState,
    },
};

/// Registers a browser push subscription.
///
/// `POST /users/{user_id}/notifications`
///
/// # Access Control
/// - The user named in the path
///
/// # Returns
/// - `204 No Content` - Subscription stored; a "New Subscription" push is queued
/// - `400 Bad Request` - `endpoint`, `auth` or `p256dh` missing
pub async fn create_subscription(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Json(payload): Json<CreateSubscriptionDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&AuthRule::user(&user_id))
        .await?;

    NotificationService::new(&state.db, &state.push_tx)
        .subscribe(
            &user_id,
            NewSubscription {
                endpoint: payload.endpoint,
                auth: payload.auth,
                p256dh: payload.p256dh,
                user_agent: user_agent(&headers).map(str::to_string),
            },
            Utc::now(),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /users/{user_id}/notifications?notif_id=`
///
/// # Returns
/// - `204 No Content` - Subscription removed
/// - `404 Not Found` - The user has no subscription with that id
pub async fn delete_subscription(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    Query(param): Query<NotifIdParam>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&AuthRule::user(&user_id))
        .await?;

    NotificationService::new(&state.db, &state.push_tx)
        .unsubscribe(&user_id, &param.notif_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /users/{user_id}/notifications`
pub async fn get_subscriptions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &headers)
        .require(&AuthRule::user(&user_id))
        .await?;

    let subscriptions: Vec<SubscriptionDto> = NotificationService::new(&state.db, &state.push_tx)
        .list(&user_id)
        .await?
        .into_iter()
        .map(|subscription| subscription.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(subscriptions)))
}

/// `GET /notifications/info`
///
/// VAPID public key browsers need to subscribe.
pub async fn get_notification_info(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    Ok((
        StatusCode::OK,
        Json(NotificationInfoDto {
            public_key: state.config.vapid_public_key.clone(),
        }),
    ))
}
