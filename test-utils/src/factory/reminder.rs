//! Vote reminder factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a vote reminder last acknowledged at `last_acked`.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - User to remind
/// - `target_type` - Type of the entity to vote for
/// - `target_id` - Id of the entity to vote for
/// - `last_acked` - When the reminder last fired
///
/// # Returns
/// - `Ok(entity::user_reminder::Model)` - Created reminder
/// - `Err(DbErr)` - Database error during insert
pub async fn create_reminder(
    db: &DatabaseConnection,
    user_id: &str,
    target_type: &str,
    target_id: &str,
    last_acked: DateTime<Utc>,
) -> Result<entity::user_reminder::Model, DbErr> {
    entity::user_reminder::ActiveModel {
        user_id: ActiveValue::Set(user_id.to_string()),
        target_id: ActiveValue::Set(target_id.to_string()),
        target_type: ActiveValue::Set(target_type.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        last_acked: ActiveValue::Set(last_acked),
        ..Default::default()
    }
    .insert(db)
    .await
}
