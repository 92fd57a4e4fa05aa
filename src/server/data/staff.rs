use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::server::perms::PartialPosition;

pub struct StaffRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StaffRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Loads a staff member's positions and per-user overrides.
    ///
    /// Position IDs that do not parse or no longer exist are skipped.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the staff member
    ///
    /// # Returns
    /// - `Ok(Some((positions, overrides)))` - The user is a staff member
    /// - `Ok(None)` - The user is not a staff member
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_member_permissions(
        &self,
        user_id: &str,
    ) -> Result<Option<(Vec<PartialPosition>, Vec<String>)>, DbErr> {
        let Some(member) = entity::prelude::StaffMember::find_by_id(user_id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let position_ids: Vec<Uuid> = member
            .positions
            .0
            .iter()
            .filter_map(|id| Uuid::parse_str(id).ok())
            .collect();

        let positions = if position_ids.is_empty() {
            Vec::new()
        } else {
            entity::prelude::StaffPosition::find()
                .filter(entity::staff_position::Column::Id.is_in(position_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|position| {
                    PartialPosition::new(position.id.to_string(), position.index, position.perms.into())
                })
                .collect()
        };

        Ok(Some((positions, member.perm_overrides.into())))
    }
}
