//! HTTP request handlers.
//!
//! Handlers authenticate through `AuthGuard`, call one service and convert the returned
//! domain models into DTOs. Target types in paths are parsed here, so services only see
//! `TargetType`.

pub mod auth;
pub mod credit;
pub mod listing;
pub mod notification;
pub mod param;
pub mod perms;
pub mod reminder;
pub mod session;
pub mod team;
pub mod vanity;
pub mod vote;

use axum::http::{header::USER_AGENT, HeaderMap};

/// The request's `User-Agent`, when present and valid UTF-8.
pub(crate) fn user_agent(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
}
