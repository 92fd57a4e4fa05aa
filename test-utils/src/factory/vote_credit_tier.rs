//! Vote credit tier factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Creates a vote credit slab for a target type.
///
/// # Arguments
/// - `db` - Database connection
/// - `target_type` - Entity type the tier applies to
/// - `position` - Order of the slab, lowest first
/// - `votes` - Width of the slab in votes
/// - `cents` - Credit per vote inside the slab
///
/// # Returns
/// - `Ok(entity::vote_credit_tier::Model)` - Created tier
/// - `Err(DbErr)` - Database error during insert
pub async fn create_tier(
    db: &DatabaseConnection,
    target_type: &str,
    position: i32,
    votes: i64,
    cents: i64,
) -> Result<entity::vote_credit_tier::Model, DbErr> {
    entity::vote_credit_tier::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        target_type: ActiveValue::Set(target_type.to_string()),
        position: ActiveValue::Set(position),
        votes: ActiveValue::Set(votes),
        cents: ActiveValue::Set(cents),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
