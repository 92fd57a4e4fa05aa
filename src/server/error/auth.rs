use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Header telling clients to discard a stored session token.
pub const SESSION_INVALID_HEADER: HeaderName = HeaderName::from_static("x-session-invalid");

/// Message returned to banned users outside the ban-exempt scope.
pub const BANNED_MESSAGE: &str =
    "You are banned from the list. If you think this is a mistake, please contact support.";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// No usable `Authorization` header was sent to a route requiring one.
    #[error("You must be logged in to access this endpoint")]
    MissingCredentials,

    /// The token did not match any session or entity.
    #[error("Invalid token")]
    InvalidToken,

    /// The session exists but its expiry has passed.
    #[error("Your session has expired, please login again")]
    SessionExpired,

    /// The token belongs to a different entity than the one in the URL.
    #[error("You are not allowed to access this resource")]
    TargetMismatch,

    /// The principal is banned and the route is not ban exempt.
    #[error("{}", BANNED_MESSAGE)]
    Banned,

    /// The session's scope does not permit this route.
    #[error("This session's scope ({0}) cannot be used on this endpoint")]
    ScopeNotAllowed(String),

    /// The login request came from an unsupported client.
    #[error("Your client is outdated and is not supported. Please contact the developers of this client.")]
    OutdatedClient,

    /// The OAuth2 code was already exchanged.
    #[error("Code has been used before and is as such invalid")]
    CodeReused,

    /// A user who is not banned asked for the ban-exempt scope.
    #[error("This scope is only for banned users")]
    BanExemptScopeRequiresBan,
}

/// Converts authentication errors into HTTP responses.
///
/// - `MissingCredentials` / `InvalidToken` / `SessionExpired` → 401 Unauthorized. The
///   latter two carry `X-Session-Invalid: true` so clients can drop the stored token.
/// - `OutdatedClient` / `CodeReused` → 400 Bad Request
/// - Everything else → 403 Forbidden
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::MissingCredentials | Self::InvalidToken | Self::SessionExpired => {
                StatusCode::UNAUTHORIZED
            }
            Self::OutdatedClient | Self::CodeReused => StatusCode::BAD_REQUEST,
            Self::TargetMismatch
            | Self::Banned
            | Self::ScopeNotAllowed(_)
            | Self::BanExemptScopeRequiresBan => StatusCode::FORBIDDEN,
        };

        let invalidates_session = matches!(self, Self::InvalidToken | Self::SessionExpired);

        let mut response = (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response();

        if invalidates_session {
            response
                .headers_mut()
                .insert(SESSION_INVALID_HEADER, HeaderValue::from_static("true"));
        }

        response
    }
}
