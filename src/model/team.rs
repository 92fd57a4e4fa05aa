use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateTeamDto {
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TeamDto {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TeamMemberDto {
    pub team_id: String,
    pub user_id: String,
    pub flags: Vec<String>,
    pub mentionable: bool,
    pub data_holder: bool,
}

/// Full replacement flag list for a team member.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PatchMemberPermsDto {
    pub perms: Vec<String>,
}
