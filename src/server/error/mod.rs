//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for automatic error handling in API endpoints.

pub mod auth;
pub mod config;
pub mod permission;
pub mod validation;
pub mod vote;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::{
        error::{
            auth::AuthError, config::ConfigError, permission::PermissionError,
            validation::ValidationError, vote::VoteError,
        },
        perms::PatchError,
    },
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Domain-specific errors handle their own
/// response mapping, while generic variants provide standard HTTP status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication error.
    ///
    /// Delegates to `AuthError::into_response()` for 401/403 mapping.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Authorization error from the entity permission checks.
    #[error(transparent)]
    PermissionErr(#[from] PermissionError),

    /// Rejected permission patch.
    ///
    /// Results in 403 Forbidden carrying the violated permission.
    #[error(transparent)]
    PatchErr(#[from] PatchError),

    /// Invalid request input with per-field messages.
    #[error(transparent)]
    ValidationErr(#[from] ValidationError),

    /// Vote or vote credit rule violation.
    #[error(transparent)]
    VoteErr(#[from] VoteError),

    /// Database operation error from SeaORM.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Redis command error.
    #[error(transparent)]
    RedisErr(#[from] redis::RedisError),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Listener or socket error while serving.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// The request conflicts with the current state.
    ///
    /// Results in 409 Conflict with the provided error message.
    #[error("{0}")]
    Conflict(String),

    /// The resource existed but is permanently gone.
    ///
    /// Results in 410 Gone with the provided error message.
    #[error("{0}")]
    Gone(String),

    /// An external dependency such as Discord failed.
    ///
    /// Results in 502 Bad Gateway. The message is logged, not returned.
    #[error("{0}")]
    UpstreamUnavailable(String),

    /// Internal server error with custom message.
    ///
    /// Results in 500 Internal Server Error. The provided message is logged
    /// but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest`, validation errors and most vote errors
/// - 403 Forbidden - For rejected permission patches
/// - 404 Not Found - For `NotFound`
/// - 409 Conflict - For `Conflict`
/// - 410 Gone - For `Gone`
/// - 502 Bad Gateway - For `UpstreamUnavailable`
/// - 500 Internal Server Error - For all other error types (DbErr, RedisErr, etc.)
/// - Variable - For `AuthErr`, `PermissionErr` and `VoteErr`, delegated to their own mapping
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::PermissionErr(err) => err.into_response(),
            Self::ValidationErr(err) => err.into_response(),
            Self::VoteErr(err) => err.into_response(),
            Self::PatchErr(err) => error_response(StatusCode::FORBIDDEN, err.to_string()),
            Self::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            Self::Conflict(msg) => error_response(StatusCode::CONFLICT, msg),
            Self::Gone(msg) => error_response(StatusCode::GONE, msg),
            Self::UpstreamUnavailable(msg) => {
                tracing::error!("Upstream unavailable: {}", msg);
                error_response(
                    StatusCode::BAD_GATEWAY,
                    "An upstream service is currently unavailable",
                )
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
