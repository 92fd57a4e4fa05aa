//! Web-Push subscriptions of users.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tokio::sync::mpsc;

use crate::server::{
    data::notification::SubscriptionRepository,
    error::{validation::ValidationError, AppError},
    model::notification::{
        CreateSubscriptionParams, NotificationPayload, PushMessage, Subscription,
    },
    service::push::notify_user,
    util::token::{random_string, NOTIF_ID_LENGTH},
};

/// User agent stored when the browser sent none.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (unknown browser)";

/// A subscription submitted by a browser.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub endpoint: String,
    pub auth: String,
    pub p256dh: String,
    pub user_agent: Option<String>,
}

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
    push_tx: &'a mpsc::Sender<PushMessage>,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection, push_tx: &'a mpsc::Sender<PushMessage>) -> Self {
        Self { db, push_tx }
    }

    /// Stores a subscription and greets it with a test notification.
    ///
    /// A previous subscription on the same endpoint is replaced.
    ///
    /// # Returns
    /// - `Ok(Subscription)` - The stored subscription with its new `notif_id`
    /// - `Err(AppError::ValidationErr(FieldRequired))` - `endpoint`, `auth` or `p256dh` missing
    /// - `Err(AppError::DbErr(_))` - Database error; nothing was stored
    pub async fn subscribe(
        &self,
        user_id: &str,
        subscription: NewSubscription,
        now: DateTime<Utc>,
    ) -> Result<Subscription, AppError> {
        for (field, value) in [
            ("endpoint", &subscription.endpoint),
            ("auth", &subscription.auth),
            ("p256dh", &subscription.p256dh),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::required(field).into());
            }
        }

        let ua = subscription
            .user_agent
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let txn = self.db.begin().await?;
        let stored = SubscriptionRepository::new(&txn)
            .replace(
                random_string(NOTIF_ID_LENGTH),
                CreateSubscriptionParams {
                    user_id: user_id.to_string(),
                    endpoint: subscription.endpoint,
                    auth: subscription.auth,
                    p256dh: subscription.p256dh,
                    ua,
                },
                now,
            )
            .await?;
        txn.commit().await?;

        notify_user(
            self.db,
            self.push_tx,
            user_id,
            &NotificationPayload {
                title: "New Subscription".to_string(),
                message: "You have subscribed to notifications on this device".to_string(),
                icon: None,
            },
        )
        .await?;

        Ok(stored)
    }

    /// Removes one of a user's subscriptions.
    ///
    /// # Returns
    /// - `Ok(())` - The subscription was deleted
    /// - `Err(AppError::NotFound)` - The user has no subscription with this ID
    pub async fn unsubscribe(&self, user_id: &str, notif_id: &str) -> Result<(), AppError> {
        let deleted = SubscriptionRepository::new(self.db)
            .delete_for_user(user_id, notif_id)
            .await?;

        if !deleted {
            return Err(AppError::NotFound("Subscription not found".to_string()));
        }

        Ok(())
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Subscription>, AppError> {
        Ok(SubscriptionRepository::new(self.db)
            .get_by_user(user_id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use test_utils::builder::TestBuilder;

    use super::*;
    use crate::server::service::push::PUSH_CHANNEL_CAPACITY;

    fn new_subscription(endpoint: &str) -> NewSubscription {
        NewSubscription {
            endpoint: endpoint.to_string(),
            auth: "auth".to_string(),
            p256dh: "p256dh".to_string(),
            user_agent: None,
        }
    }

    /// Tests that re-subscribing an endpoint replaces the old row.
    ///
    /// Expected: one subscription with a fresh 64 character ID and the default user agent
    #[tokio::test]
    async fn resubscribe_replaces_endpoint() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_notification_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let (tx, mut rx) = mpsc::channel(PUSH_CHANNEL_CAPACITY);
        let service = NotificationService::new(db, &tx);

        let first = service
            .subscribe("1", new_subscription("https://push.example/a"), Utc::now())
            .await?;
        let second = service
            .subscribe("1", new_subscription("https://push.example/a"), Utc::now())
            .await?;

        assert_ne!(first.notif_id, second.notif_id);
        assert_eq!(second.notif_id.len(), NOTIF_ID_LENGTH);
        assert_eq!(second.ua, DEFAULT_USER_AGENT);

        let subscriptions = service.list("1").await?;
        assert_eq!(subscriptions.len(), 1);

        assert!(rx.recv().await.is_some());

        Ok(())
    }

    /// Tests required fields and unknown IDs.
    ///
    /// Expected: Err(ValidationErr) for a blank key, Err(NotFound) when unsubscribing twice
    #[tokio::test]
    async fn validates_and_reports_missing() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_notification_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let (tx, _rx) = mpsc::channel(PUSH_CHANNEL_CAPACITY);
        let service = NotificationService::new(db, &tx);

        let mut missing = new_subscription("https://push.example/a");
        missing.p256dh = String::new();
        let result = service.subscribe("1", missing, Utc::now()).await;
        assert!(matches!(
            result,
            Err(AppError::ValidationErr(ValidationError::FieldRequired { .. }))
        ));

        let stored = service
            .subscribe("1", new_subscription("https://push.example/b"), Utc::now())
            .await?;
        service.unsubscribe("1", &stored.notif_id).await?;
        let result = service.unsubscribe("1", &stored.notif_id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        Ok(())
    }
}
