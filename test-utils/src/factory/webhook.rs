//! Vote webhook factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Creates a webhook for an entity.
///
/// # Arguments
/// - `db` - Database connection
/// - `target_type` - Type of the owning entity
/// - `target_id` - Id of the owning entity
/// - `url` - Delivery URL
pub async fn create_webhook(
    db: &DatabaseConnection,
    target_type: &str,
    target_id: &str,
    url: &str,
) -> Result<entity::webhook::Model, DbErr> {
    entity::webhook::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        target_id: ActiveValue::Set(target_id.to_string()),
        target_type: ActiveValue::Set(target_type.to_string()),
        url: ActiveValue::Set(url.to_string()),
        secret: ActiveValue::Set("test-secret".to_string()),
        broken: ActiveValue::Set(false),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
