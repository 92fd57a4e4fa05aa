//! Staff position and staff member factories.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|item| item.to_string()).collect()
}

/// Creates a staff position.
///
/// # Arguments
/// - `db` - Database connection
/// - `name` - Position name
/// - `index` - Priority; lower is stronger
/// - `perms` - Permissions granted by the position
pub async fn create_position(
    db: &DatabaseConnection,
    name: &str,
    index: i32,
    perms: &[&str],
) -> Result<entity::staff_position::Model, DbErr> {
    entity::staff_position::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        name: ActiveValue::Set(name.to_string()),
        index: ActiveValue::Set(index),
        perms: ActiveValue::Set(owned(perms).into()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

/// Creates a staff member holding the given positions and overrides.
pub async fn create_member(
    db: &DatabaseConnection,
    user_id: &str,
    positions: &[Uuid],
    overrides: &[&str],
) -> Result<entity::staff_member::Model, DbErr> {
    entity::staff_member::ActiveModel {
        user_id: ActiveValue::Set(user_id.to_string()),
        positions: ActiveValue::Set(
            positions
                .iter()
                .map(Uuid::to_string)
                .collect::<Vec<_>>()
                .into(),
        ),
        perm_overrides: ActiveValue::Set(owned(overrides).into()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
