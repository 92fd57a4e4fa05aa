//! Vote reminders.
//!
//! A reminder fires at most once per cooldown: once `last_acked` is more than four hours
//! old and the user may vote again, every device the user subscribed is notified.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tokio::sync::mpsc;

use crate::server::{
    config::Config,
    data::reminder::ReminderRepository,
    error::AppError,
    model::{
        auth::TargetType,
        notification::{NotificationPayload, PushMessage, Reminder},
        vote::EntityInfo,
    },
    service::{entity_info::EntityInfoService, push::notify_user, vote::VoteService},
};

/// Minimum time between two firings of the same reminder.
pub const REMINDER_INTERVAL_HOURS: i64 = 4;

pub struct ReminderService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
    push_tx: &'a mpsc::Sender<PushMessage>,
}

impl<'a> ReminderService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        config: &'a Config,
        push_tx: &'a mpsc::Sender<PushMessage>,
    ) -> Self {
        Self {
            db,
            config,
            push_tx,
        }
    }

    /// Sets a reminder for an entity, replacing any previous one for the same entity.
    ///
    /// # Returns
    /// - `Ok(Reminder)` - The stored reminder
    /// - `Err(AppError::NotFound(_))` / `Err(AppError::VoteErr(_))` - The entity cannot be voted for
    /// - `Err(AppError::DbErr(_))` - Database error; nothing was stored
    pub async fn add(
        &self,
        user_id: &str,
        target_type: TargetType,
        target_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Reminder, AppError> {
        let info = EntityInfoService::new(self.db, self.config)
            .resolve(target_type, target_id)
            .await?;

        let txn = self.db.begin().await?;
        let reminder = ReminderRepository::new(&txn)
            .replace(user_id, target_type.as_str(), target_id, now, now)
            .await?;
        txn.commit().await?;

        notify_user(
            self.db,
            self.push_tx,
            user_id,
            &NotificationPayload {
                title: "Added Reminder".to_string(),
                message: format!("You will now be reminded to vote for {}", info.name),
                icon: Some(info.avatar),
            },
        )
        .await?;

        Ok(reminder)
    }

    /// Removes a user's reminder for an entity.
    ///
    /// # Returns
    /// - `Ok(())` - The reminder was deleted
    /// - `Err(AppError::NotFound)` - No reminder for this entity
    pub async fn delete(
        &self,
        user_id: &str,
        target_type: TargetType,
        target_id: &str,
    ) -> Result<(), AppError> {
        let deleted = ReminderRepository::new(self.db)
            .delete(user_id, target_type.as_str(), target_id)
            .await?;

        if deleted == 0 {
            return Err(AppError::NotFound("Reminder not found".to_string()));
        }

        Ok(())
    }

    /// Lists a user's reminders with the display data of entities that still resolve.
    pub async fn list(
        &self,
        user_id: &str,
    ) -> Result<Vec<(Reminder, Option<EntityInfo>)>, AppError> {
        let reminders = ReminderRepository::new(self.db)
            .get_by_user(user_id)
            .await?;

        let info_service = EntityInfoService::new(self.db, self.config);
        let mut listed = Vec::with_capacity(reminders.len());
        for reminder in reminders {
            let info = match reminder.target_type.parse::<TargetType>() {
                Ok(target_type) => info_service
                    .resolve(target_type, &reminder.target_id)
                    .await
                    .ok(),
                Err(_) => None,
            };
            listed.push((reminder, info));
        }

        Ok(listed)
    }

    /// Fires every due reminder once.
    ///
    /// Reminders whose user still has an active vote are skipped. `last_acked` is
    /// advanced before notifications are queued.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of reminders that fired
    /// - `Err(AppError::DbErr(_))` - Failed to read due reminders
    pub async fn tick(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let cutoff = now - Duration::hours(REMINDER_INTERVAL_HOURS);
        let due = ReminderRepository::new(self.db).get_due(cutoff).await?;

        let mut grouped: HashMap<(String, String, String), usize> = HashMap::new();
        let mut order = Vec::new();
        for reminder in due {
            let key = (
                reminder.user_id.clone(),
                reminder.target_type.clone(),
                reminder.target_id.clone(),
            );
            let count = grouped.entry(key).or_insert(0);
            if *count == 0 {
                order.push(reminder);
            }
            *count += 1;
        }

        let mut fired = 0;
        for reminder in order {
            let key = (
                reminder.user_id.clone(),
                reminder.target_type.clone(),
                reminder.target_id.clone(),
            );
            let duplicates = grouped.get(&key).copied().unwrap_or(1) > 1;

            match self.fire(&reminder, duplicates, now).await {
                Ok(true) => fired += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(
                        user_id = %reminder.user_id,
                        target_type = %reminder.target_type,
                        target_id = %reminder.target_id,
                        "Failed to process reminder: {}",
                        e
                    );
                }
            }
        }

        Ok(fired)
    }

    async fn fire(
        &self,
        reminder: &Reminder,
        duplicates: bool,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let repo = ReminderRepository::new(self.db);

        if duplicates {
            tracing::debug!(
                user_id = %reminder.user_id,
                target_id = %reminder.target_id,
                "Collapsing duplicate reminders"
            );

            let txn = self.db.begin().await?;
            ReminderRepository::new(&txn)
                .replace(
                    &reminder.user_id,
                    &reminder.target_type,
                    &reminder.target_id,
                    reminder.last_acked,
                    reminder.created_at,
                )
                .await?;
            txn.commit().await?;
        }

        let target_type = reminder.target_type.parse::<TargetType>()?;

        let status = VoteService::new(self.db, self.config)
            .status(&reminder.user_id, target_type, &reminder.target_id, now)
            .await?;
        if status.has_voted {
            return Ok(false);
        }

        let info = EntityInfoService::new(self.db, self.config)
            .resolve(target_type, &reminder.target_id)
            .await?;

        repo.set_last_acked(
            &reminder.user_id,
            &reminder.target_type,
            &reminder.target_id,
            now,
        )
        .await?;

        notify_user(
            self.db,
            self.push_tx,
            &reminder.user_id,
            &NotificationPayload {
                title: format!("Vote for {}!", info.name),
                message: format!("You can vote for {} now!", info.name),
                icon: Some(info.avatar),
            },
        )
        .await?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use sea_orm::EntityTrait;
    use test_utils::{builder::TestBuilder, factory};

    use super::*;
    use crate::server::service::push::{
        deliver, fake::RecordingPushTransport, PUSH_CHANNEL_CAPACITY,
    };

    /// Tests one tick against a due reminder and two devices, one of them expired.
    ///
    /// Expected: two push attempts, `last_acked` advanced, expired subscription deleted
    #[tokio::test]
    async fn tick_fans_out_to_every_device() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let config = Config::for_tests();

        let now = Utc::now();
        let bot = factory::bot::BotFactory::new(db).build().await?;
        factory::create_reminder(db, "1", "bot", &bot.bot_id, now - Duration::hours(5)).await?;
        factory::create_subscription(db, "1", "https://push.example/a").await?;
        let gone = factory::create_subscription(db, "1", "https://push.example/gone").await?;

        let (tx, mut rx) = mpsc::channel(PUSH_CHANNEL_CAPACITY);
        let fired = ReminderService::new(db, &config, &tx).tick(now).await?;
        drop(tx);
        assert_eq!(fired, 1);

        let transport = RecordingPushTransport::with_gone(&["https://push.example/gone"]);
        while let Some(message) = rx.recv().await {
            deliver(db, &transport, message).await;
        }

        let endpoints: HashSet<String> = transport
            .sent
            .lock()
            .await
            .iter()
            .map(|(endpoint, _)| endpoint.clone())
            .collect();
        assert_eq!(endpoints.len(), 2);
        assert_eq!(transport.sent.lock().await.len(), 2);

        let reminders = entity::prelude::UserReminder::find().all(db).await?;
        assert_eq!(reminders.len(), 1);
        assert!((reminders[0].last_acked - now).num_milliseconds().abs() < 1000);

        assert!(entity::prelude::UserNotification::find_by_id(gone.notif_id)
            .one(db)
            .await?
            .is_none());

        Ok(())
    }

    /// Tests that a user who can not vote yet is not reminded.
    ///
    /// Expected: nothing fires and `last_acked` is unchanged
    #[tokio::test]
    async fn tick_skips_users_with_active_vote() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let config = Config::for_tests();

        let now = Utc::now();
        let bot = factory::bot::BotFactory::new(db).premium(false).build().await?;
        let last_acked = now - Duration::hours(5);
        factory::create_reminder(db, "1", "bot", &bot.bot_id, last_acked).await?;
        factory::vote::VoteFactory::new(db, "bot", &bot.bot_id, "1")
            .created_at(now - Duration::minutes(10))
            .build()
            .await?;

        let (tx, _rx) = mpsc::channel(PUSH_CHANNEL_CAPACITY);
        let fired = ReminderService::new(db, &config, &tx).tick(now).await?;
        assert_eq!(fired, 0);

        let reminders = entity::prelude::UserReminder::find().all(db).await?;
        assert!((reminders[0].last_acked - last_acked).num_milliseconds().abs() < 1000);

        Ok(())
    }

    /// Tests that duplicate reminders collapse into one.
    ///
    /// Expected: a single reminder row after the tick
    #[tokio::test]
    async fn tick_collapses_duplicates() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let config = Config::for_tests();

        let now = Utc::now();
        let bot = factory::bot::BotFactory::new(db).build().await?;
        factory::create_reminder(db, "1", "bot", &bot.bot_id, now - Duration::hours(6)).await?;
        factory::create_reminder(db, "1", "bot", &bot.bot_id, now - Duration::hours(5)).await?;

        let (tx, _rx) = mpsc::channel(PUSH_CHANNEL_CAPACITY);
        let fired = ReminderService::new(db, &config, &tx).tick(now).await?;
        assert_eq!(fired, 1);

        let reminders = entity::prelude::UserReminder::find().all(db).await?;
        assert_eq!(reminders.len(), 1);

        Ok(())
    }

    /// Tests add and delete.
    ///
    /// Expected: re-adding keeps one row; deleting twice reports NotFound
    #[tokio::test]
    async fn add_replaces_and_delete_reports_missing() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let config = Config::for_tests();

        let bot = factory::bot::BotFactory::new(db).build().await?;
        let (tx, _rx) = mpsc::channel(PUSH_CHANNEL_CAPACITY);
        let service = ReminderService::new(db, &config, &tx);

        service.add("1", TargetType::Bot, &bot.bot_id, Utc::now()).await?;
        service.add("1", TargetType::Bot, &bot.bot_id, Utc::now()).await?;

        let listed = service.list("1").await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].1.as_ref().map(|info| info.name.clone()), Some(bot.name));

        service.delete("1", TargetType::Bot, &bot.bot_id).await?;
        let result = service.delete("1", TargetType::Bot, &bot.bot_id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        Ok(())
    }
}
