use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::team::{CreateTeamParams, Team, TeamMember};

pub struct TeamRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TeamRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, team_id: Uuid) -> Result<Option<Team>, DbErr> {
        Ok(entity::prelude::Team::find_by_id(team_id)
            .one(self.db)
            .await?
            .map(Team::from_entity))
    }

    /// Creates a team and makes its creator a member holding `global.*`.
    ///
    /// # Arguments
    /// - `params` - Team name, avatar and creator
    /// - `now` - Creation timestamp
    ///
    /// # Returns
    /// - `Ok((Team, TeamMember))` - The new team and its owner membership
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        params: CreateTeamParams,
        now: DateTime<Utc>,
    ) -> Result<(Team, TeamMember), DbErr> {
        let team = entity::team::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(params.name),
            avatar: ActiveValue::Set(params.avatar),
            vote_banned: ActiveValue::Set(false),
            votes: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        let member = entity::team_member::ActiveModel {
            team_id: ActiveValue::Set(team.id),
            user_id: ActiveValue::Set(params.owner_id),
            flags: ActiveValue::Set(vec![crate::server::perms::GLOBAL_WILDCARD.to_string()].into()),
            mentionable: ActiveValue::Set(true),
            data_holder: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok((Team::from_entity(team), TeamMember::from_entity(member)))
    }

    /// Gets the membership of a user in a team.
    ///
    /// # Returns
    /// - `Ok(Some(TeamMember))` - The user is a member
    /// - `Ok(None)` - The user is not a member
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_member(
        &self,
        team_id: Uuid,
        user_id: &str,
    ) -> Result<Option<TeamMember>, DbErr> {
        Ok(entity::prelude::TeamMember::find()
            .filter(entity::team_member::Column::TeamId.eq(team_id))
            .filter(entity::team_member::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
            .map(TeamMember::from_entity))
    }

    /// Gets every member of a team, oldest first.
    pub async fn get_members(&self, team_id: Uuid) -> Result<Vec<TeamMember>, DbErr> {
        let members = entity::prelude::TeamMember::find()
            .filter(entity::team_member::Column::TeamId.eq(team_id))
            .order_by_asc(entity::team_member::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(members.into_iter().map(TeamMember::from_entity).collect())
    }

    /// Replaces a member's permission flags.
    ///
    /// # Returns
    /// - `Ok(true)` - The membership was updated
    /// - `Ok(false)` - No such membership
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_member_flags(
        &self,
        team_id: Uuid,
        user_id: &str,
        flags: Vec<String>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::TeamMember::update_many()
            .filter(entity::team_member::Column::TeamId.eq(team_id))
            .filter(entity::team_member::Column::UserId.eq(user_id))
            .set(entity::team_member::ActiveModel {
                flags: ActiveValue::Set(flags.into()),
                ..Default::default()
            })
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
