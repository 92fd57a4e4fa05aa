use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::server::{
    controller::param::PageParam, error::AppError, service::listing::ListingService,
    state::AppState,
};

/// `GET /servers/{server_id}`
pub async fn get_server(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let server = ListingService::new(&state.db).get_server(&server_id).await?;

    Ok((StatusCode::OK, Json(server)))
}

/// Lists approved and certified servers by votes.
///
/// `GET /servers?page=N`
///
/// # Returns
/// - `200 OK` - `PaginatedDto<ServerDto>` with 12 servers per page
/// - `400 Bad Request` - `page` is 0
pub async fn get_servers(
    State(state): State<AppState>,
    Query(param): Query<PageParam>,
) -> Result<impl IntoResponse, AppError> {
    let page = ListingService::new(&state.db).get_servers(param.page).await?;

    Ok((StatusCode::OK, Json(page)))
}

/// `GET /servers/index`
pub async fn get_server_index(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let index = ListingService::new(&state.db).get_server_index().await?;

    Ok((StatusCode::OK, Json(index)))
}

/// `GET /bots/{bot_id}`
pub async fn get_bot(
    State(state): State<AppState>,
    Path(bot_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bot = ListingService::new(&state.db).get_bot(&bot_id).await?;

    Ok((StatusCode::OK, Json(bot)))
}
