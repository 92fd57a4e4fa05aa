//! Push subscription, reminder and notification payload models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::notification::{ReminderDto, SubscriptionDto};

/// A stored Web-Push subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub notif_id: String,
    pub user_id: String,
    pub endpoint: String,
    pub auth: String,
    pub p256dh: String,
    pub ua: String,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn from_entity(entity: entity::user_notification::Model) -> Self {
        Self {
            notif_id: entity.notif_id,
            user_id: entity.user_id,
            endpoint: entity.endpoint,
            auth: entity.auth,
            p256dh: entity.p256dh,
            ua: entity.ua,
            created_at: entity.created_at,
        }
    }

    /// Converts to the listing DTO, dropping the key material.
    pub fn into_dto(self) -> SubscriptionDto {
        SubscriptionDto {
            notif_id: self.notif_id,
            endpoint: self.endpoint,
            ua: self.ua,
            created_at: self.created_at,
        }
    }
}

/// Parameters for storing a subscription.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionParams {
    pub user_id: String,
    pub endpoint: String,
    pub auth: String,
    pub p256dh: String,
    pub ua: String,
}

/// JSON body delivered to the browser's service worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A payload addressed to one subscription, queued for the fan-out worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    pub notif_id: String,
    pub payload: Vec<u8>,
}

/// A vote reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: i32,
    pub user_id: String,
    pub target_id: String,
    pub target_type: String,
    pub created_at: DateTime<Utc>,
    pub last_acked: DateTime<Utc>,
}

impl Reminder {
    pub fn from_entity(entity: entity::user_reminder::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            target_id: entity.target_id,
            target_type: entity.target_type,
            created_at: entity.created_at,
            last_acked: entity.last_acked,
        }
    }

    /// Converts to a DTO, attaching the entity's display data when it resolved.
    pub fn into_dto(self, name: Option<String>, avatar: Option<String>) -> ReminderDto {
        ReminderDto {
            user_id: self.user_id,
            target_id: self.target_id,
            target_type: self.target_type,
            name,
            avatar,
            created_at: self.created_at,
            last_acked: self.last_acked,
        }
    }
}
