//! Session factory for creating api and login sessions.

use crate::factory::helpers::unique_token;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test sessions.
pub struct SessionFactory<'a> {
    db: &'a DatabaseConnection,
    target_type: String,
    target_id: String,
    session_type: String,
    scope: String,
    perm_limits: Vec<String>,
    token: String,
    expiry: DateTime<Utc>,
}

impl<'a> SessionFactory<'a> {
    /// Creates a login session with normal scope for the target, valid for one hour.
    pub fn new(db: &'a DatabaseConnection, target_type: &str, target_id: &str) -> Self {
        Self {
            db,
            target_type: target_type.to_string(),
            target_id: target_id.to_string(),
            session_type: "login".to_string(),
            scope: "normal".to_string(),
            perm_limits: Vec::new(),
            token: unique_token("session"),
            expiry: Utc::now() + Duration::hours(1),
        }
    }

    /// Sets the session type, `login` or `api`.
    pub fn session_type(mut self, session_type: impl Into<String>) -> Self {
        self.session_type = session_type.into();
        self
    }

    /// Sets the session scope.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Sets the permission limits applied to requests made with the session.
    pub fn perm_limits(mut self, perm_limits: &[&str]) -> Self {
        self.perm_limits = perm_limits.iter().map(|perm| perm.to_string()).collect();
        self
    }

    /// Sets the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Sets the expiry instant.
    pub fn expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = expiry;
        self
    }

    /// Builds and inserts the session into the database.
    pub async fn build(self) -> Result<entity::api_session::Model, DbErr> {
        entity::api_session::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(None),
            session_type: ActiveValue::Set(self.session_type),
            scope: ActiveValue::Set(self.scope),
            target_type: ActiveValue::Set(self.target_type),
            target_id: ActiveValue::Set(self.target_id),
            perm_limits: ActiveValue::Set(self.perm_limits.into()),
            token: ActiveValue::Set(self.token),
            expiry: ActiveValue::Set(self.expiry),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a login session with normal scope for the target.
pub async fn create_session(
    db: &DatabaseConnection,
    target_type: &str,
    target_id: &str,
) -> Result<entity::api_session::Model, DbErr> {
    SessionFactory::new(db, target_type, target_id).build().await
}
