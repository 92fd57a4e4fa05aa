use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::notification::Reminder;

pub struct ReminderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReminderRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets reminders last acknowledged before `cutoff`, oldest first.
    pub async fn get_due(&self, cutoff: DateTime<Utc>) -> Result<Vec<Reminder>, DbErr> {
        let reminders = entity::prelude::UserReminder::find()
            .filter(entity::user_reminder::Column::LastAcked.lt(cutoff))
            .order_by_asc(entity::user_reminder::Column::LastAcked)
            .order_by_asc(entity::user_reminder::Column::Id)
            .all(self.db)
            .await?;

        Ok(reminders.into_iter().map(Reminder::from_entity).collect())
    }

    pub async fn get_by_user(&self, user_id: &str) -> Result<Vec<Reminder>, DbErr> {
        let reminders = entity::prelude::UserReminder::find()
            .filter(entity::user_reminder::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_reminder::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(reminders.into_iter().map(Reminder::from_entity).collect())
    }

    /// Replaces every reminder a user has for a target with a single fresh one.
    ///
    /// Call inside a transaction so that the delete and insert are applied together.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the user
    /// - `target_type` - Type of the reminded entity
    /// - `target_id` - Identifier of the reminded entity
    /// - `last_acked` - Initial acknowledgement time
    /// - `now` - Creation timestamp
    ///
    /// # Returns
    /// - `Ok(Reminder)` - The stored reminder
    /// - `Err(DbErr)` - Database error during delete or insert
    pub async fn replace(
        &self,
        user_id: &str,
        target_type: &str,
        target_id: &str,
        last_acked: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Reminder, DbErr> {
        self.delete(user_id, target_type, target_id).await?;

        let reminder = entity::user_reminder::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            target_id: ActiveValue::Set(target_id.to_string()),
            target_type: ActiveValue::Set(target_type.to_string()),
            created_at: ActiveValue::Set(now),
            last_acked: ActiveValue::Set(last_acked),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Reminder::from_entity(reminder))
    }

    /// Deletes every reminder a user has for a target.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of reminders deleted
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(
        &self,
        user_id: &str,
        target_type: &str,
        target_id: &str,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::UserReminder::delete_many()
            .filter(entity::user_reminder::Column::UserId.eq(user_id))
            .filter(entity::user_reminder::Column::TargetType.eq(target_type))
            .filter(entity::user_reminder::Column::TargetId.eq(target_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Marks a user's reminders for a target as acknowledged at `now`.
    pub async fn set_last_acked(
        &self,
        user_id: &str,
        target_type: &str,
        target_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        entity::prelude::UserReminder::update_many()
            .filter(entity::user_reminder::Column::UserId.eq(user_id))
            .filter(entity::user_reminder::Column::TargetType.eq(target_type))
            .filter(entity::user_reminder::Column::TargetId.eq(target_id))
            .col_expr(entity::user_reminder::Column::LastAcked, Expr::value(now))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
