//! Signed vote webhooks.

use std::time::Duration;

use chrono::Utc;
use hmac::{Hmac, Mac};
use sea_orm::DatabaseConnection;
use serde_json::json;
use sha2::Sha512;
use url::Url;

use crate::server::{
    data::webhook::{WebhookAttempt, WebhookRepository},
    error::AppError,
    model::vote::CastVote,
};

type HmacSha512 = Hmac<Sha512>;

pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";
pub const PROTOCOL_HEADER: &str = "X-Webhook-Protocol";
pub const PROTOCOL: &str = "hmac-sha512";

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest response body kept in the webhook log.
const MAX_LOGGED_RESPONSE: usize = 1024;

/// Outcome of one delivery, stored in `webhook_logs.state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookState {
    Success,
    RequestFailed,
    InvalidRequestUrl,
    LocalhostUrl,
}

impl WebhookState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::RequestFailed => "REQUEST_FAILED",
            Self::InvalidRequestUrl => "INVALID_REQUEST_URL",
            Self::LocalhostUrl => "LOCALHOST_URL",
        }
    }
}

/// Hex encoded HMAC-SHA512 of `body` keyed by `secret`.
pub fn sign(secret: &str, body: &[u8]) -> Result<String, AppError> {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::InternalError(format!("Invalid webhook secret: {}", e)))?;
    mac.update(body);

    Ok(hex::encode(mac.finalize().into_bytes()))
}

fn is_localhost(url: &Url) -> bool {
    match url.host_str() {
        Some(host) => {
            let host = host.trim_start_matches('[').trim_end_matches(']');
            host == "localhost"
                || host.ends_with(".localhost")
                || host == "127.0.0.1"
                || host == "0.0.0.0"
                || host == "::1"
        }
        None => true,
    }
}

pub struct WebhookService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
}

impl<'a> WebhookService<'a> {
    pub fn new(db: &'a DatabaseConnection, http_client: &'a reqwest::Client) -> Self {
        Self { db, http_client }
    }

    /// Delivers a vote event to every active webhook of the voted entity.
    ///
    /// Every attempt is recorded in the webhook log. Delivery failures and log write
    /// failures are logged and never stop delivery to the remaining webhooks.
    ///
    /// # Returns
    /// - `Ok(Vec<WebhookState>)` - Outcome per attempted webhook
    /// - `Err(AppError::DbErr(_))` - Failed to read webhooks
    pub async fn dispatch_vote(&self, vote: &CastVote) -> Result<Vec<WebhookState>, AppError> {
        let repo = WebhookRepository::new(self.db);
        let webhooks = repo.get_active(&vote.target_type, &vote.target_id).await?;

        let data = json!({
            "votes": vote.votes,
            "per_user": vote.per_user,
            "downvote": !vote.upvote,
            "user_id": vote.user_id,
            "target_id": vote.target_id,
            "target_type": vote.target_type,
        });
        let body = serde_json::to_vec(&json!({ "type": "entity.vote", "data": data }))
            .map_err(|e| AppError::InternalError(format!("Failed to encode webhook: {}", e)))?;

        let mut states = Vec::with_capacity(webhooks.len());
        for webhook in webhooks {
            let (state, status_code, response) =
                match self.deliver(&webhook.url, &webhook.secret, &body).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        tracing::error!(
                            webhook_id = %webhook.id,
                            "Failed to prepare webhook delivery: {}",
                            e
                        );
                        continue;
                    }
                };

            if state != WebhookState::Success {
                tracing::warn!(
                    target_id = %vote.target_id,
                    target_type = %vote.target_type,
                    webhook_id = %webhook.id,
                    "Webhook delivery failed: {}",
                    state.as_str()
                );
            }

            let logged = repo
                .insert_log(
                    WebhookAttempt {
                        webhook_id: webhook.id,
                        target_id: vote.target_id.clone(),
                        target_type: vote.target_type.clone(),
                        user_id: vote.user_id.clone(),
                        url: webhook.url,
                        data: data.clone(),
                        state: state.as_str().to_string(),
                        status_code,
                        response,
                    },
                    Utc::now(),
                )
                .await;

            if let Err(e) = logged {
                tracing::error!(webhook_id = %webhook.id, "Failed to write webhook log: {}", e);
            }

            states.push(state);
        }

        Ok(states)
    }

    async fn deliver(
        &self,
        url: &str,
        secret: &str,
        body: &[u8],
    ) -> Result<(WebhookState, Option<i32>, Option<String>), AppError> {
        let Ok(parsed) = Url::parse(url) else {
            return Ok((WebhookState::InvalidRequestUrl, None, None));
        };

        if !matches!(parsed.scheme(), "http" | "https") {
            return Ok((WebhookState::InvalidRequestUrl, None, None));
        }

        if is_localhost(&parsed) {
            return Ok((WebhookState::LocalhostUrl, None, None));
        }

        let signature = sign(secret, body)?;

        let result = self
            .http_client
            .post(parsed)
            .timeout(WEBHOOK_TIMEOUT)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, signature)
            .header(PROTOCOL_HEADER, PROTOCOL)
            .body(body.to_vec())
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => return Ok((WebhookState::RequestFailed, None, Some(e.to_string()))),
        };

        let status = response.status();
        let mut text = response.text().await.unwrap_or_default();
        if text.len() > MAX_LOGGED_RESPONSE {
            let mut end = MAX_LOGGED_RESPONSE;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            text.truncate(end);
        }

        let state = if status.is_success() {
            WebhookState::Success
        } else {
            WebhookState::RequestFailed
        };

        Ok((state, Some(i32::from(status.as_u16())), Some(text)))
    }
}
