use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};
use uuid::Uuid;

pub struct WebhookRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

/// One delivery attempt to record in the webhook log.
#[derive(Debug, Clone)]
pub struct WebhookAttempt {
    pub webhook_id: Uuid,
    pub target_id: String,
    pub target_type: String,
    pub user_id: String,
    pub url: String,
    pub data: serde_json::Value,
    pub state: String,
    pub status_code: Option<i32>,
    pub response: Option<String>,
}

impl<'a, C: ConnectionTrait> WebhookRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets the webhooks of a target that are not marked broken.
    pub async fn get_active(
        &self,
        target_type: &str,
        target_id: &str,
    ) -> Result<Vec<entity::webhook::Model>, DbErr> {
        entity::prelude::Webhook::find()
            .filter(entity::webhook::Column::TargetType.eq(target_type))
            .filter(entity::webhook::Column::TargetId.eq(target_id))
            .filter(entity::webhook::Column::Broken.eq(false))
            .all(self.db)
            .await
    }

    /// Appends a delivery attempt to the webhook log.
    pub async fn insert_log(
        &self,
        attempt: WebhookAttempt,
        now: DateTime<Utc>,
    ) -> Result<entity::webhook_log::Model, DbErr> {
        entity::webhook_log::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            webhook_id: ActiveValue::Set(attempt.webhook_id),
            target_id: ActiveValue::Set(attempt.target_id),
            target_type: ActiveValue::Set(attempt.target_type),
            user_id: ActiveValue::Set(attempt.user_id),
            url: ActiveValue::Set(attempt.url),
            data: ActiveValue::Set(attempt.data),
            state: ActiveValue::Set(attempt.state),
            status_code: ActiveValue::Set(attempt.status_code),
            response: ActiveValue::Set(attempt.response),
            tries: ActiveValue::Set(1),
            created_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}
