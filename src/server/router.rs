use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::server::{
    controller::{auth, credit, listing, notification, perms, reminder, session, team, vanity, vote},
    error::AppError,
    state::AppState,
};

/// Seconds until a spent login request is replenished.
const LOGIN_REPLENISH_SECONDS: u64 = 30;

/// Login requests a single IP may burst.
const LOGIN_BURST: u32 = 2;

/// Login route, limited to 2 requests per minute per client IP.
///
/// # Returns
/// - `Ok(Router)` - The rate-limited route
/// - `Err(AppError::InternalError(_))` - The limiter rejected its quota
fn login_router() -> Result<Router<AppState>, AppError> {
    let governor = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(LOGIN_REPLENISH_SECONDS)
        .burst_size(LOGIN_BURST)
        .finish()
        .ok_or_else(|| AppError::InternalError("Invalid login rate limit".to_string()))?;

    Ok(Router::new()
        .route("/auth/login/discord-oauth2", post(auth::login))
        .layer(GovernorLayer::new(Arc::new(governor))))
}

pub fn router() -> Result<Router<AppState>, AppError> {
    let router = Router::new()
        .route("/authorize/info", get(auth::get_authorize_info))
        .route(
            "/sessions/{target_type}/{target_id}",
            post(session::create_session).get(session::get_sessions),
        )
        .route(
            "/sessions/{target_type}/{target_id}/{session_id}",
            delete(session::revoke_session),
        )
        .route(
            "/users/{user_id}/{target_type}/{target_id}/votes",
            get(vote::get_user_votes).put(vote::put_user_vote),
        )
        .route(
            "/vote-credit-tiers/{target_type}",
            get(credit::get_vote_credit_tiers),
        )
        .route(
            "/users/{user_id}/{target_type}/{target_id}/vote-credits",
            get(credit::get_vote_credits),
        )
        .route(
            "/users/{user_id}/{target_type}/{target_id}/vote-credits/redeem",
            post(credit::redeem_vote_credits),
        )
        .route(
            "/users/{user_id}/{target_type}/{target_id}/vote-redeem-logs",
            get(credit::get_vote_redeem_logs),
        )
        .route(
            "/users/{user_id}/{target_type}/{target_id}/reminders",
            put(reminder::put_reminder).delete(reminder::delete_reminder),
        )
        .route("/users/{user_id}/reminders", get(reminder::get_reminders))
        .route(
            "/users/{user_id}/notifications",
            post(notification::create_subscription)
                .delete(notification::delete_subscription)
                .get(notification::get_subscriptions),
        )
        .route(
            "/notifications/info",
            get(notification::get_notification_info),
        )
        .route("/teams", post(team::create_team))
        .route(
            "/teams/{team_id}/members/{member_id}/perms",
            patch(team::patch_member_perms),
        )
        .route(
            "/entity-perms/{target_type}/{target_id}",
            get(perms::get_entity_perms),
        )
        .route("/users/{user_id}/staff-perms", get(perms::get_staff_perms))
        .route(
            "/users/{user_id}/vanity/{target_id}",
            patch(vanity::patch_vanity),
        )
        .route("/servers", get(listing::get_servers))
        .route("/servers/index", get(listing::get_server_index))
        .route("/servers/{server_id}", get(listing::get_server))
        .route("/bots/{bot_id}", get(listing::get_bot))
        .merge(login_router()?)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
