use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Reasons an authenticated principal may not act on an entity.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PermissionError {
    /// The target type in the URL is not one the operation supports.
    #[error("Invalid target type: {0}")]
    InvalidTargetType(String),

    /// A non-user principal tried to act on a different entity.
    #[error("This operation is not supported across entities")]
    CrossEntityNotSupported,

    /// A user tried to act on another user.
    #[error("Users cannot modify other users")]
    UsersCannotModifyOtherUsers,

    /// The principal lacks a required permission.
    #[error("You do not have the required permission: {0}")]
    MissingPermission(String),
}

/// `InvalidTargetType` → 400 Bad Request, everything else → 403 Forbidden.
impl IntoResponse for PermissionError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::InvalidTargetType(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::FORBIDDEN,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
