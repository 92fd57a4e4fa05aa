use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::credit::VoteCreditTierDto,
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::auth::{AuthRule, TargetType},
        perms,
        service::{credit::CreditService, entity_perms::EntityPermissionService},
        state::AppState,
    },
};

/// Authenticates `user_id` and checks `<target_type>.redeem_vote_credits` on the entity.
async fn authorize_credits(
    state: &AppState,
    headers: &HeaderMap,
    user_id: &str,
    target_type: &str,
    target_id: &str,
) -> Result<TargetType, AppError> {
    let target_type: TargetType = target_type.parse()?;
    let auth = AuthGuard::new(&state.db, headers)
        .require(&AuthRule::user(user_id))
        .await?;

    EntityPermissionService::new(&state.db)
        .authorize(
            &auth,
            target_type,
            target_id,
            &perms::build(target_type.as_str(), "redeem_vote_credits"),
        )
        .await?;

    Ok(target_type)
}

/// `GET /vote-credit-tiers/{target_type}`
///
/// Public list of the credit tiers of a target type, in tier order.
pub async fn get_vote_credit_tiers(
    State(state): State<AppState>,
    Path(target_type): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let target_type: TargetType = target_type.parse()?;

    let tiers: Vec<VoteCreditTierDto> = CreditService::new(&state.db)
        .tiers(target_type)
        .await?
        .into_iter()
        .map(|tier| tier.into_dto())
        .collect();

    Ok((StatusCode::OK, Json(tiers)))
}

/// Credits the entity could redeem now.
///
/// `GET /users/{user_id}/{target_type}/{target_id}/vote-credits`
///
/// # Access Control
/// - The user named in the path, holding `<target_type>.redeem_vote_credits`
///
/// # Returns
/// - `200 OK` - `VoteCreditSummaryDto`
/// - `400 Bad Request` - The target type does not earn credits
pub async fn get_vote_credits(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((user_id, target_type, target_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let target_type =
        authorize_credits(&state, &headers, &user_id, &target_type, &target_id).await?;

    let summary = CreditService::new(&state.db)
        .summary(target_type, &target_id, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}

/// Redeems every accrued credit.
///
/// `POST /users/{user_id}/{target_type}/{target_id}/vote-credits/redeem`
///
/// # Access Control
/// - The user named in the path, holding `<target_type>.redeem_vote_credits`
///
/// # Returns
/// - `200 OK` - `RedeemLogDto` of the new redemption
/// - `400 Bad Request` - Nothing to redeem, or the target type does not earn credits
/// - `409 Conflict` - A concurrent redemption claimed some of the votes
pub async fn redeem_vote_credits(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((user_id, target_type, target_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let target_type =
        authorize_credits(&state, &headers, &user_id, &target_type, &target_id).await?;

    let log = CreditService::new(&state.db)
        .redeem(target_type, &target_id, Utc::now())
        .await?;

    Ok((StatusCode::OK, Json(log.into_dto())))
}

/// `GET /users/{user_id}/{target_type}/{target_id}/vote-redeem-logs`
///
/// Past redemptions with the total, redeemed and available credits.
pub async fn get_vote_redeem_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((user_id, target_type, target_id)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let target_type =
        authorize_credits(&state, &headers, &user_id, &target_type, &target_id).await?;

    let logs = CreditService::new(&state.db)
        .redeem_logs(target_type, &target_id)
        .await?;

    Ok((StatusCode::OK, Json(logs.into_dto())))
}
