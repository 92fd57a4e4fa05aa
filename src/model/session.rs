use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateSessionDto {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub session_type: String,
    #[serde(default)]
    pub perm_limits: Vec<String>,
    /// Lifetime of the session in seconds.
    pub expiry: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreatedSessionDto {
    pub token: String,
    pub session_id: String,
}

/// A session as listed to its owner. The token is never included.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionDto {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub session_type: String,
    pub scope: String,
    pub target_type: String,
    pub target_id: String,
    pub perm_limits: Vec<String>,
    pub expiry: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
