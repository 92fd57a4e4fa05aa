//! Server factory for creating test server entities.

use crate::factory::helpers::{next_id, unique_token};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test servers with customizable fields.
pub struct ServerFactory<'a> {
    db: &'a DatabaseConnection,
    server_id: String,
    name: String,
    owner: Option<String>,
    team_owner: Option<Uuid>,
    server_type: String,
    premium: bool,
    start_premium_period: DateTime<Utc>,
    premium_period_length: i64,
    vote_banned: bool,
    votes: i64,
}

impl<'a> ServerFactory<'a> {
    /// Creates a new ServerFactory with default values.
    ///
    /// Defaults to an approved, non-premium server without an owner and with no votes.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            server_id: id.to_string(),
            name: format!("Server {}", id),
            owner: None,
            team_owner: None,
            server_type: "approved".to_string(),
            premium: false,
            start_premium_period: Utc::now(),
            premium_period_length: 0,
            vote_banned: false,
            votes: 0,
        }
    }

    /// Sets the server id.
    pub fn server_id(mut self, server_id: impl Into<String>) -> Self {
        self.server_id = server_id.into();
        self
    }

    /// Sets the owning user.
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the owning team.
    pub fn team_owner(mut self, team_owner: Uuid) -> Self {
        self.team_owner = Some(team_owner);
        self
    }

    /// Sets the review state.
    pub fn server_type(mut self, server_type: impl Into<String>) -> Self {
        self.server_type = server_type.into();
        self
    }

    /// Sets the premium flag.
    pub fn premium(mut self, premium: bool) -> Self {
        self.premium = premium;
        self
    }

    /// Sets the premium window.
    ///
    /// # Arguments
    /// - `start` - When the premium period began
    /// - `length_secs` - Length of the period in seconds
    pub fn premium_period(mut self, start: DateTime<Utc>, length_secs: i64) -> Self {
        self.start_premium_period = start;
        self.premium_period_length = length_secs;
        self
    }

    /// Sets whether the server is banned from receiving votes.
    pub fn vote_banned(mut self, vote_banned: bool) -> Self {
        self.vote_banned = vote_banned;
        self
    }

    /// Sets the cached vote count.
    pub fn votes(mut self, votes: i64) -> Self {
        self.votes = votes;
        self
    }

    /// Builds and inserts the server entity into the database.
    pub async fn build(self) -> Result<entity::server::Model, DbErr> {
        entity::server::ActiveModel {
            server_id: ActiveValue::Set(self.server_id),
            name: ActiveValue::Set(self.name),
            owner: ActiveValue::Set(self.owner),
            team_owner: ActiveValue::Set(self.team_owner),
            server_type: ActiveValue::Set(self.server_type),
            premium: ActiveValue::Set(self.premium),
            start_premium_period: ActiveValue::Set(self.start_premium_period),
            premium_period_length: ActiveValue::Set(self.premium_period_length),
            vote_banned: ActiveValue::Set(self.vote_banned),
            votes: ActiveValue::Set(self.votes),
            api_token: ActiveValue::Set(unique_token("server")),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a server owned by the given user.
pub async fn create_server(
    db: &DatabaseConnection,
    owner: &str,
) -> Result<entity::server::Model, DbErr> {
    ServerFactory::new(db).owner(owner).build().await
}
