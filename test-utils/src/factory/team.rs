//! Team factory for creating teams and their members.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test teams.
pub struct TeamFactory<'a> {
    db: &'a DatabaseConnection,
    id: Uuid,
    name: String,
    vote_banned: bool,
}

impl<'a> TeamFactory<'a> {
    /// Creates a new TeamFactory with a random id and a numbered name.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            id: Uuid::new_v4(),
            name: format!("Team {}", next_id()),
            vote_banned: false,
        }
    }

    /// Sets the team id.
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the team name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets whether the team is banned from receiving votes.
    pub fn vote_banned(mut self, vote_banned: bool) -> Self {
        self.vote_banned = vote_banned;
        self
    }

    /// Builds and inserts the team entity into the database.
    pub async fn build(self) -> Result<entity::team::Model, DbErr> {
        entity::team::ActiveModel {
            id: ActiveValue::Set(self.id),
            name: ActiveValue::Set(self.name),
            avatar: ActiveValue::Set(None),
            vote_banned: ActiveValue::Set(self.vote_banned),
            votes: ActiveValue::Set(0),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a team with default values.
pub async fn create_team(db: &DatabaseConnection) -> Result<entity::team::Model, DbErr> {
    TeamFactory::new(db).build().await
}

/// Adds a user to a team with the given permission flags.
///
/// # Arguments
/// - `db` - Database connection
/// - `team_id` - Team to join
/// - `user_id` - Member's user id
/// - `flags` - Unresolved permission flags of the member
///
/// # Returns
/// - `Ok(entity::team_member::Model)` - Created membership
/// - `Err(DbErr)` - Database error during insert
pub async fn create_team_member(
    db: &DatabaseConnection,
    team_id: Uuid,
    user_id: &str,
    flags: &[&str],
) -> Result<entity::team_member::Model, DbErr> {
    entity::team_member::ActiveModel {
        team_id: ActiveValue::Set(team_id),
        user_id: ActiveValue::Set(user_id.to_string()),
        flags: ActiveValue::Set(
            flags
                .iter()
                .map(|flag| flag.to_string())
                .collect::<Vec<_>>()
                .into(),
        ),
        mentionable: ActiveValue::Set(true),
        data_holder: ActiveValue::Set(false),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
