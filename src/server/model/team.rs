//! Team domain models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::team::{TeamDto, TeamMemberDto};

#[derive(Debug, Clone)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn from_entity(entity: entity::team::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            avatar: entity.avatar,
            votes: entity.votes,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> TeamDto {
        TeamDto {
            id: self.id.to_string(),
            name: self.name,
            avatar: self.avatar,
            votes: self.votes,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TeamMember {
    pub id: i32,
    pub team_id: Uuid,
    pub user_id: String,
    /// Unresolved permission flags.
    pub flags: Vec<String>,
    pub mentionable: bool,
    pub data_holder: bool,
}

impl TeamMember {
    pub fn from_entity(entity: entity::team_member::Model) -> Self {
        Self {
            id: entity.id,
            team_id: entity.team_id,
            user_id: entity.user_id,
            flags: entity.flags.into(),
            mentionable: entity.mentionable,
            data_holder: entity.data_holder,
        }
    }

    pub fn into_dto(self) -> TeamMemberDto {
        TeamMemberDto {
            team_id: self.team_id.to_string(),
            user_id: self.user_id,
            flags: self.flags,
            mentionable: self.mentionable,
            data_holder: self.data_holder,
        }
    }
}

/// Parameters for creating a team with its first member.
#[derive(Debug, Clone)]
pub struct CreateTeamParams {
    pub name: String,
    pub avatar: Option<String>,
    pub owner_id: String,
}
