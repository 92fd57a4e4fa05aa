use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServerDto {
    pub server_id: String,
    pub name: String,
    pub owner: Option<String>,
    pub team_owner: Option<String>,
    #[serde(rename = "type")]
    pub server_type: String,
    pub premium: bool,
    pub votes: i64,
    pub vanity: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BotDto {
    pub bot_id: String,
    pub name: String,
    pub owner: Option<String>,
    pub team_owner: Option<String>,
    #[serde(rename = "type")]
    pub bot_type: String,
    pub premium: bool,
    pub votes: i64,
    pub vanity: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServerIndexDto {
    pub top_voted: Vec<ServerDto>,
    pub certified: Vec<ServerDto>,
    pub premium: Vec<ServerDto>,
}
