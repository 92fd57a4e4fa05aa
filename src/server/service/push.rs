//! Web-Push delivery.
//!
//! Services enqueue `PushMessage`s on a bounded channel; a single worker drains it and
//! talks to the push services. A subscription is only deleted when its push service
//! answers 404 or 410.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use thiserror::Error;
use tokio::sync::mpsc;
use web_push::{
    ContentEncoding, IsahcWebPushClient, SubscriptionInfo, VapidSignatureBuilder, WebPushClient,
    WebPushError, WebPushMessageBuilder,
};

use crate::server::{
    config::Config,
    data::notification::SubscriptionRepository,
    error::AppError,
    model::notification::{NotificationPayload, PushMessage, Subscription},
};

/// Capacity of the notification channel.
pub const PUSH_CHANNEL_CAPACITY: usize = 512;

/// Seconds a push service keeps an undelivered message.
const PUSH_TTL_SECONDS: u32 = 30;

const PUSH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum PushError {
    /// The push service no longer knows the subscription.
    #[error("Subscription is gone")]
    Gone,

    #[error("Push failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn send(&self, subscription: &Subscription, payload: &[u8]) -> Result<(), PushError>;
}

/// `PushTransport` signing requests with the configured VAPID key pair.
pub struct WebPushTransport {
    client: IsahcWebPushClient,
    private_key: String,
    subscriber: String,
}

impl WebPushTransport {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = IsahcWebPushClient::new()
            .map_err(|e| AppError::InternalError(format!("Failed to build push client: {}", e)))?;

        Ok(Self {
            client,
            private_key: config.vapid_private_key.clone(),
            subscriber: config.push_subscriber.clone(),
        })
    }

    fn build_message(
        &self,
        subscription: &Subscription,
        payload: &[u8],
    ) -> Result<web_push::WebPushMessage, WebPushError> {
        let info = SubscriptionInfo::new(
            &subscription.endpoint,
            &subscription.p256dh,
            &subscription.auth,
        );

        let mut signature = VapidSignatureBuilder::from_base64(&self.private_key, web_push::URL_SAFE_NO_PAD, &info)?;
        signature.add_claim("sub", self.subscriber.as_str());

        let mut builder = WebPushMessageBuilder::new(&info);
        builder.set_payload(ContentEncoding::Aes128Gcm, payload);
        builder.set_vapid_signature(signature.build()?);
        builder.set_ttl(PUSH_TTL_SECONDS);

        builder.build()
    }
}

#[async_trait]
impl PushTransport for WebPushTransport {
    async fn send(&self, subscription: &Subscription, payload: &[u8]) -> Result<(), PushError> {
        let message = self
            .build_message(subscription, payload)
            .map_err(|e| PushError::Failed(e.to_string()))?;

        match tokio::time::timeout(PUSH_TIMEOUT, self.client.send(message)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(WebPushError::EndpointNotFound))
            | Ok(Err(WebPushError::EndpointNotValid)) => Err(PushError::Gone),
            Ok(Err(e)) => Err(PushError::Failed(e.to_string())),
            Err(_) => Err(PushError::Failed("timed out".to_string())),
        }
    }
}

/// Queues a payload for every distinct subscription of a user.
///
/// # Arguments
/// - `db` - Database connection
/// - `push_tx` - Sender of the notification channel
/// - `user_id` - Discord ID of the recipient
/// - `payload` - Notification to deliver
///
/// # Returns
/// - `Ok(usize)` - Number of messages queued
/// - `Err(AppError::DbErr(_))` - Failed to read the subscriptions
/// - `Err(AppError::InternalError(_))` - The worker is gone or the payload failed to encode
pub async fn notify_user(
    db: &DatabaseConnection,
    push_tx: &mpsc::Sender<PushMessage>,
    user_id: &str,
    payload: &NotificationPayload,
) -> Result<usize, AppError> {
    let bytes = serde_json::to_vec(payload)
        .map_err(|e| AppError::InternalError(format!("Failed to encode notification: {}", e)))?;

    let mut subscriptions = SubscriptionRepository::new(db).get_by_user(user_id).await?;
    subscriptions.sort_by(|a, b| a.endpoint.cmp(&b.endpoint));
    subscriptions.dedup_by(|a, b| a.endpoint == b.endpoint);

    let queued = subscriptions.len();
    for subscription in subscriptions {
        push_tx
            .send(PushMessage {
                notif_id: subscription.notif_id,
                payload: bytes.clone(),
            })
            .await
            .map_err(|_| AppError::InternalError("Notification channel closed".to_string()))?;
    }

    Ok(queued)
}

/// Delivers queued messages until every sender is dropped.
pub async fn run_push_worker(
    db: DatabaseConnection,
    transport: Arc<dyn PushTransport>,
    mut rx: mpsc::Receiver<PushMessage>,
) {
    while let Some(message) = rx.recv().await {
        deliver(&db, transport.as_ref(), message).await;
    }

    tracing::info!("Push worker stopped");
}

/// Delivers one message, deleting the subscription if its push service reports it gone.
pub async fn deliver(db: &DatabaseConnection, transport: &dyn PushTransport, message: PushMessage) {
    let repo = SubscriptionRepository::new(db);

    let subscription = match repo.find_by_id(&message.notif_id).await {
        Ok(Some(subscription)) => subscription,
        Ok(None) => {
            tracing::debug!(notif_id = %message.notif_id, "Subscription removed before delivery");
            return;
        }
        Err(e) => {
            tracing::error!(notif_id = %message.notif_id, "Failed to load subscription: {}", e);
            return;
        }
    };

    match transport.send(&subscription, &message.payload).await {
        Ok(()) => {}
        Err(PushError::Gone) => {
            tracing::info!(
                notif_id = %subscription.notif_id,
                user_id = %subscription.user_id,
                "Deleting expired push subscription"
            );

            if let Err(e) = repo.delete(&subscription.notif_id).await {
                tracing::error!(notif_id = %subscription.notif_id, "Failed to delete subscription: {}", e);
            }
        }
        Err(e) => {
            tracing::warn!(notif_id = %subscription.notif_id, "{}", e);
        }
    }
}

#[cfg(test)]
pub mod fake {
    use std::collections::HashSet;

    use tokio::sync::Mutex;

    use super::*;

    /// Records deliveries; endpoints listed in `gone` answer as expired.
    #[derive(Default)]
    pub struct RecordingPushTransport {
        pub gone: HashSet<String>,
        pub sent: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl RecordingPushTransport {
        pub fn with_gone(endpoints: &[&str]) -> Self {
            Self {
                gone: endpoints.iter().map(|e| e.to_string()).collect(),
                sent: Mutex::default(),
            }
        }
    }

    #[async_trait]
    impl PushTransport for RecordingPushTransport {
        async fn send(&self, subscription: &Subscription, payload: &[u8]) -> Result<(), PushError> {
            self.sent
                .lock()
                .await
                .push((subscription.endpoint.clone(), payload.to_vec()));

            if self.gone.contains(&subscription.endpoint) {
                return Err(PushError::Gone);
            }

            Ok(())
        }
    }
}
