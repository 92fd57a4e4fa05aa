use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Browser push subscription as produced by the Push API.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CreateSubscriptionDto {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub auth: String,
    #[serde(default)]
    pub p256dh: String,
}

/// A stored subscription without its key material.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SubscriptionDto {
    pub notif_id: String,
    pub endpoint: String,
    pub ua: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NotificationInfoDto {
    pub public_key: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReminderDto {
    pub user_id: String,
    pub target_id: String,
    pub target_type: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_acked: DateTime<Utc>,
}
