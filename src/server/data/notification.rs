//! Repository for Web-Push subscriptions.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::notification::{CreateSubscriptionParams, Subscription};

pub struct SubscriptionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SubscriptionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, notif_id: &str) -> Result<Option<Subscription>, DbErr> {
        Ok(entity::prelude::UserNotification::find_by_id(notif_id.to_string())
            .one(self.db)
            .await?
            .map(Subscription::from_entity))
    }

    /// Gets every subscription of a user, oldest first.
    pub async fn get_by_user(&self, user_id: &str) -> Result<Vec<Subscription>, DbErr> {
        let subscriptions = entity::prelude::UserNotification::find()
            .filter(entity::user_notification::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_notification::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(subscriptions
            .into_iter()
            .map(Subscription::from_entity)
            .collect())
    }

    /// Stores a subscription, replacing any existing one with the same endpoint.
    ///
    /// Call inside a transaction so that the delete and insert are applied together.
    ///
    /// # Arguments
    /// - `notif_id` - Generated identifier of the new subscription
    /// - `params` - Owner, push endpoint, keys and user agent
    /// - `now` - Creation timestamp
    ///
    /// # Returns
    /// - `Ok(Subscription)` - The stored subscription
    /// - `Err(DbErr)` - Database error during delete or insert
    pub async fn replace(
        &self,
        notif_id: String,
        params: CreateSubscriptionParams,
        now: DateTime<Utc>,
    ) -> Result<Subscription, DbErr> {
        entity::prelude::UserNotification::delete_many()
            .filter(entity::user_notification::Column::Endpoint.eq(params.endpoint.as_str()))
            .exec(self.db)
            .await?;

        let subscription = entity::user_notification::ActiveModel {
            notif_id: ActiveValue::Set(notif_id),
            user_id: ActiveValue::Set(params.user_id),
            auth: ActiveValue::Set(params.auth),
            p256dh: ActiveValue::Set(params.p256dh),
            endpoint: ActiveValue::Set(params.endpoint),
            ua: ActiveValue::Set(params.ua),
            created_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Subscription::from_entity(subscription))
    }

    /// Deletes a subscription owned by a user.
    ///
    /// # Returns
    /// - `Ok(true)` - The subscription was deleted
    /// - `Ok(false)` - The user has no subscription with this ID
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_for_user(&self, user_id: &str, notif_id: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::UserNotification::delete_many()
            .filter(entity::user_notification::Column::UserId.eq(user_id))
            .filter(entity::user_notification::Column::NotifId.eq(notif_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes a subscription regardless of owner. Used when a push service reports it gone.
    pub async fn delete(&self, notif_id: &str) -> Result<(), DbErr> {
        entity::prelude::UserNotification::delete_by_id(notif_id.to_string())
            .exec(self.db)
            .await?;
        Ok(())
    }
}
