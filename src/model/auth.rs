use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of the OAuth2 code exchange.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequestDto {
    pub client_id: String,
    pub code: String,
    pub redirect_uri: String,
    pub protocol: String,
    pub scope: String,
}

/// Session handed back after a successful login.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponseDto {
    pub target_id: String,
    pub token: String,
    pub session_id: String,
    pub expiry: DateTime<Utc>,
}

/// Parameters a client needs to start the OAuth2 flow.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthorizeInfoDto {
    pub client_id: String,
    pub protocol: String,
}
