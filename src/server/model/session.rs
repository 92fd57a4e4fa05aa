//! API session domain models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::session::SessionDto;

/// Session type issued by the OAuth2 login.
pub const SESSION_TYPE_LOGIN: &str = "login";
/// Session type created explicitly for integrations.
pub const SESSION_TYPE_API: &str = "api";

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub name: Option<String>,
    pub session_type: String,
    pub scope: String,
    pub target_type: String,
    pub target_id: String,
    pub perm_limits: Vec<String>,
    pub expiry: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Converts an entity model at the repository boundary, dropping the token.
    pub fn from_entity(entity: entity::api_session::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            session_type: entity.session_type,
            scope: entity.scope,
            target_type: entity.target_type,
            target_id: entity.target_id,
            perm_limits: entity.perm_limits.into(),
            expiry: entity.expiry,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> SessionDto {
        SessionDto {
            id: self.id.to_string(),
            name: self.name,
            session_type: self.session_type,
            scope: self.scope,
            target_type: self.target_type,
            target_id: self.target_id,
            perm_limits: self.perm_limits,
            expiry: self.expiry,
            created_at: self.created_at,
        }
    }
}

/// Parameters for creating a session.
#[derive(Debug, Clone)]
pub struct CreateSessionParams {
    pub target_type: String,
    pub target_id: String,
    pub name: Option<String>,
    pub session_type: String,
    pub scope: String,
    pub perm_limits: Vec<String>,
    pub expiry: DateTime<Utc>,
}

/// A freshly created session. The token is returned exactly once.
#[derive(Debug, Clone)]
pub struct CreatedSession {
    pub id: Uuid,
    pub token: String,
    pub expiry: DateTime<Utc>,
}

/// An API session requested by a principal, before validation.
#[derive(Debug, Clone)]
pub struct NewApiSession {
    pub name: Option<String>,
    pub session_type: String,
    pub perm_limits: Vec<String>,
    /// Requested lifetime in seconds.
    pub expiry_secs: i64,
}
