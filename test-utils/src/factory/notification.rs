//! Web push subscription factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a web push subscription for a user on the given endpoint.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Subscriber
/// - `endpoint` - Push service endpoint URL
///
/// # Returns
/// - `Ok(entity::user_notification::Model)` - Created subscription
/// - `Err(DbErr)` - Database error during insert
pub async fn create_subscription(
    db: &DatabaseConnection,
    user_id: &str,
    endpoint: &str,
) -> Result<entity::user_notification::Model, DbErr> {
    let id = next_id();
    entity::user_notification::ActiveModel {
        notif_id: ActiveValue::Set(format!("{id:0>64}")),
        user_id: ActiveValue::Set(user_id.to_string()),
        auth: ActiveValue::Set(format!("auth{id}")),
        p256dh: ActiveValue::Set(format!("p256dh{id}")),
        endpoint: ActiveValue::Set(endpoint.to_string()),
        ua: ActiveValue::Set("test-agent".to_string()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
