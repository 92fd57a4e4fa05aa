//! Bot factory for creating test bot entities.

use crate::factory::helpers::{next_id, unique_token};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test bots with customizable fields.
pub struct BotFactory<'a> {
    db: &'a DatabaseConnection,
    bot_id: String,
    name: String,
    owner: Option<String>,
    team_owner: Option<Uuid>,
    bot_type: String,
    premium: bool,
    start_premium_period: DateTime<Utc>,
    premium_period_length: i64,
    vote_banned: bool,
    votes: i64,
}

impl<'a> BotFactory<'a> {
    /// Creates a new BotFactory with default values.
    ///
    /// Defaults to an approved, non-premium bot without an owner and with no votes.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            bot_id: id.to_string(),
            name: format!("Bot {}", id),
            owner: None,
            team_owner: None,
            bot_type: "approved".to_string(),
            premium: false,
            start_premium_period: Utc::now(),
            premium_period_length: 0,
            vote_banned: false,
            votes: 0,
        }
    }

    /// Sets the bot id.
    pub fn bot_id(mut self, bot_id: impl Into<String>) -> Self {
        self.bot_id = bot_id.into();
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
    pub fn bot_type(mut self, bot_type: impl Into<String>) -> Self {
        self.bot_type = bot_type.into();
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

    /// Sets whether the bot is banned from receiving votes.
    pub fn vote_banned(mut self, vote_banned: bool) -> Self {
        self.vote_banned = vote_banned;
        self
    }

    /// Sets the cached vote count.
    pub fn votes(mut self, votes: i64) -> Self {
        self.votes = votes;
        self
    }

    /// Builds and inserts the bot entity into the database.
    pub async fn build(self) -> Result<entity::bot::Model, DbErr> {
        entity::bot::ActiveModel {
            bot_id: ActiveValue::Set(self.bot_id),
            name: ActiveValue::Set(self.name),
            owner: ActiveValue::Set(self.owner),
            team_owner: ActiveValue::Set(self.team_owner),
            bot_type: ActiveValue::Set(self.bot_type),
            premium: ActiveValue::Set(self.premium),
            start_premium_period: ActiveValue::Set(self.start_premium_period),
            premium_period_length: ActiveValue::Set(self.premium_period_length),
            vote_banned: ActiveValue::Set(self.vote_banned),
            votes: ActiveValue::Set(self.votes),
            api_token: ActiveValue::Set(unique_token("bot")),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a bot owned by the given user.
pub async fn create_bot(
    db: &DatabaseConnection,
    owner: &str,
) -> Result<entity::bot::Model, DbErr> {
    BotFactory::new(db).owner(owner).build().await
}
