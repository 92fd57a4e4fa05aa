//! Bot and server listing models.
//!
//! Bots and servers share their listing shape: ownership by a user or a team, a review
//! state, a premium window and a cached vote count.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    model::listing::{BotDto, ServerDto},
    server::model::auth::TargetType,
};

/// Review states that may be listed, voted for and hold premium.
pub const LISTED_TYPES: [&str; 2] = ["approved", "certified"];

/// A bot or server listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub target_type: TargetType,
    pub id: String,
    pub name: String,
    pub owner: Option<String>,
    pub team_owner: Option<Uuid>,
    /// Review state such as `approved` or `certified`.
    pub review_type: String,
    pub premium: bool,
    pub start_premium_period: DateTime<Utc>,
    /// Premium window length in seconds.
    pub premium_period_length: i64,
    pub vote_banned: bool,
    pub votes: i64,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn from_bot(entity: entity::bot::Model) -> Self {
        Self {
            target_type: TargetType::Bot,
            id: entity.bot_id,
            name: entity.name,
            owner: entity.owner,
            team_owner: entity.team_owner,
            review_type: entity.bot_type,
            premium: entity.premium,
            start_premium_period: entity.start_premium_period,
            premium_period_length: entity.premium_period_length,
            vote_banned: entity.vote_banned,
            votes: entity.votes,
            created_at: entity.created_at,
        }
    }

    pub fn from_server(entity: entity::server::Model) -> Self {
        Self {
            target_type: TargetType::Server,
            id: entity.server_id,
            name: entity.name,
            owner: entity.owner,
            team_owner: entity.team_owner,
            review_type: entity.server_type,
            premium: entity.premium,
            start_premium_period: entity.start_premium_period,
            premium_period_length: entity.premium_period_length,
            vote_banned: entity.vote_banned,
            votes: entity.votes,
            created_at: entity.created_at,
        }
    }

    pub fn is_listed(&self) -> bool {
        LISTED_TYPES.contains(&self.review_type.as_str())
    }

    /// Whether a premium listing must be demoted at `now`.
    ///
    /// Premium lapses when the listing leaves the listed review states or when its
    /// premium window has ended.
    pub fn premium_expired(&self, now: DateTime<Utc>) -> bool {
        if !self.premium {
            return false;
        }

        !self.is_listed()
            || now > self.start_premium_period + Duration::seconds(self.premium_period_length)
    }

    pub fn into_server_dto(self, vanity: Option<String>) -> ServerDto {
        ServerDto {
            server_id: self.id,
            name: self.name,
            owner: self.owner,
            team_owner: self.team_owner.map(|id| id.to_string()),
            server_type: self.review_type,
            premium: self.premium,
            votes: self.votes,
            vanity,
            created_at: self.created_at,
        }
    }

    pub fn into_bot_dto(self, vanity: Option<String>) -> BotDto {
        BotDto {
            bot_id: self.id,
            name: self.name,
            owner: self.owner,
            team_owner: self.team_owner.map(|id| id.to_string()),
            bot_type: self.review_type,
            premium: self.premium,
            votes: self.votes,
            vanity,
            created_at: self.created_at,
        }
    }
}

/// One page of server listings.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub count: u64,
    pub per_page: u64,
    pub results: Vec<Listing>,
}
