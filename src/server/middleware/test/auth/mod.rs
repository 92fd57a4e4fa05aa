use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chrono::{Duration, Utc};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::AuthGuard,
    model::auth::{AuthRule, TargetType, SCOPE_BAN_EXEMPT},
};
use test_utils::{builder::TestBuilder, factory};

mod entity_token;
mod optional;
mod session_token;

fn headers(authorization: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(authorization).unwrap());
    headers
}
