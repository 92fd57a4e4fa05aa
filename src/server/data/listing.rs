//! Repository for votable entities: bots, servers, teams and packs.
//!
//! Bots and servers share a listing shape and are mapped into [`Listing`]. Teams and packs
//! only take part in voting, so they are read through narrower lookups.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::model::{
    auth::TargetType,
    listing::{Listing, ListingPage},
};

pub struct ListingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ListingRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds a bot or server by ID.
    ///
    /// # Arguments
    /// - `target_type` - Either `Bot` or `Server`
    /// - `id` - Discord ID of the bot or server
    ///
    /// # Returns
    /// - `Ok(Some(Listing))` - Entity found
    /// - `Ok(None)` - Entity not found, or `target_type` is not a listing type
    /// - `Err(DbErr)` - Database error during query
    pub async fn find(&self, target_type: TargetType, id: &str) -> Result<Option<Listing>, DbErr> {
        match target_type {
            TargetType::Bot => Ok(entity::prelude::Bot::find_by_id(id.to_string())
                .one(self.db)
                .await?
                .map(Listing::from_bot)),
            TargetType::Server => Ok(entity::prelude::Server::find_by_id(id.to_string())
                .one(self.db)
                .await?
                .map(Listing::from_server)),
            _ => Ok(None),
        }
    }

    /// Finds a bot or server by its long-lived API token.
    pub async fn find_by_token(
        &self,
        target_type: TargetType,
        token: &str,
    ) -> Result<Option<Listing>, DbErr> {
        match target_type {
            TargetType::Bot => Ok(entity::prelude::Bot::find()
                .filter(entity::bot::Column::ApiToken.eq(token))
                .one(self.db)
                .await?
                .map(Listing::from_bot)),
            TargetType::Server => Ok(entity::prelude::Server::find()
                .filter(entity::server::Column::ApiToken.eq(token))
                .one(self.db)
                .await?
                .map(Listing::from_server)),
            _ => Ok(None),
        }
    }

    /// Gets the owning team of an entity.
    ///
    /// # Returns
    /// - `Ok(Some(team_id))` - The entity is owned by a team
    /// - `Ok(None)` - The entity is missing or owned by a single user
    /// - `Err(DbErr)` - Database error during query
    pub async fn team_owner(&self, target_type: TargetType, id: &str) -> Result<Option<Uuid>, DbErr> {
        Ok(self
            .find(target_type, id)
            .await?
            .and_then(|listing| listing.team_owner))
    }

    pub async fn find_team(&self, team_id: Uuid) -> Result<Option<entity::team::Model>, DbErr> {
        entity::prelude::Team::find_by_id(team_id).one(self.db).await
    }

    pub async fn find_pack(&self, url: &str) -> Result<Option<entity::pack::Model>, DbErr> {
        entity::prelude::Pack::find_by_id(url.to_string())
            .one(self.db)
            .await
    }

    /// Gets every bot and server currently flagged premium.
    pub async fn get_premium(&self) -> Result<Vec<Listing>, DbErr> {
        let bots = entity::prelude::Bot::find()
            .filter(entity::bot::Column::Premium.eq(true))
            .all(self.db)
            .await?;
        let servers = entity::prelude::Server::find()
            .filter(entity::server::Column::Premium.eq(true))
            .all(self.db)
            .await?;

        Ok(bots
            .into_iter()
            .map(Listing::from_bot)
            .chain(servers.into_iter().map(Listing::from_server))
            .collect())
    }

    /// Clears the premium flag of an entity and resets its premium window.
    ///
    /// Only rows still flagged premium are touched, so repeated calls are no-ops.
    ///
    /// # Arguments
    /// - `target_type` - Either `Bot` or `Server`
    /// - `id` - Discord ID of the entity
    /// - `now` - Start of the reset window
    /// - `period_length` - Length of the reset window in seconds
    ///
    /// # Returns
    /// - `Ok(true)` - The entity was demoted by this call
    /// - `Ok(false)` - The entity was already demoted or does not exist
    /// - `Err(DbErr)` - Database error during update
    pub async fn demote_premium(
        &self,
        target_type: TargetType,
        id: &str,
        now: DateTime<Utc>,
        period_length: i64,
    ) -> Result<bool, DbErr> {
        let rows_affected = match target_type {
            TargetType::Bot => {
                entity::prelude::Bot::update_many()
                    .filter(entity::bot::Column::BotId.eq(id))
                    .filter(entity::bot::Column::Premium.eq(true))
                    .col_expr(entity::bot::Column::Premium, Expr::value(false))
                    .col_expr(entity::bot::Column::StartPremiumPeriod, Expr::value(now))
                    .col_expr(
                        entity::bot::Column::PremiumPeriodLength,
                        Expr::value(period_length),
                    )
                    .exec(self.db)
                    .await?
                    .rows_affected
            }
            TargetType::Server => {
                entity::prelude::Server::update_many()
                    .filter(entity::server::Column::ServerId.eq(id))
                    .filter(entity::server::Column::Premium.eq(true))
                    .col_expr(entity::server::Column::Premium, Expr::value(false))
                    .col_expr(entity::server::Column::StartPremiumPeriod, Expr::value(now))
                    .col_expr(
                        entity::server::Column::PremiumPeriodLength,
                        Expr::value(period_length),
                    )
                    .exec(self.db)
                    .await?
                    .rows_affected
            }
            _ => 0,
        };

        Ok(rows_affected > 0)
    }

    /// Stores a recomputed vote count in the entity's cached `votes` column.
    ///
    /// # Arguments
    /// - `target_type` - Any votable type; blogs carry no cached count and are ignored
    /// - `id` - Identifier of the entity
    /// - `votes` - The new count
    pub async fn set_votes(&self, target_type: TargetType, id: &str, votes: i64) -> Result<(), DbErr> {
        match target_type {
            TargetType::Bot => {
                entity::prelude::Bot::update_many()
                    .filter(entity::bot::Column::BotId.eq(id))
                    .col_expr(entity::bot::Column::Votes, Expr::value(votes))
                    .exec(self.db)
                    .await?;
            }
            TargetType::Server => {
                entity::prelude::Server::update_many()
                    .filter(entity::server::Column::ServerId.eq(id))
                    .col_expr(entity::server::Column::Votes, Expr::value(votes))
                    .exec(self.db)
                    .await?;
            }
            TargetType::Team => {
                let Ok(team_id) = Uuid::parse_str(id) else {
                    return Ok(());
                };
                entity::prelude::Team::update_many()
                    .filter(entity::team::Column::Id.eq(team_id))
                    .col_expr(entity::team::Column::Votes, Expr::value(votes))
                    .exec(self.db)
                    .await?;
            }
            TargetType::Pack => {
                entity::prelude::Pack::update_many()
                    .filter(entity::pack::Column::Url.eq(id))
                    .col_expr(entity::pack::Column::Votes, Expr::value(votes))
                    .exec(self.db)
                    .await?;
            }
            TargetType::User | TargetType::Blog => {}
        }

        Ok(())
    }

    /// Gets a page of listed servers ordered by votes.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of servers per page
    ///
    /// # Returns
    /// - `Ok(ListingPage)` - The page with the total count of listed servers
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_servers_paginated(&self, page: u64, per_page: u64) -> Result<ListingPage, DbErr> {
        let paginator = entity::prelude::Server::find()
            .filter(entity::server::Column::ServerType.is_in(crate::server::model::listing::LISTED_TYPES))
            .order_by_desc(entity::server::Column::Votes)
            .order_by_asc(entity::server::Column::ServerId)
            .paginate(self.db, per_page);

        let count = paginator.num_items().await?;
        let servers = paginator.fetch_page(page).await?;

        Ok(ListingPage {
            count,
            per_page,
            results: servers.into_iter().map(Listing::from_server).collect(),
        })
    }

    /// Gets the highest voted listed servers.
    pub async fn get_top_servers(&self, limit: u64) -> Result<Vec<Listing>, DbErr> {
        self.server_index(None, false, limit).await
    }

    pub async fn get_certified_servers(&self, limit: u64) -> Result<Vec<Listing>, DbErr> {
        self.server_index(Some("certified"), false, limit).await
    }

    pub async fn get_premium_servers(&self, limit: u64) -> Result<Vec<Listing>, DbErr> {
        self.server_index(None, true, limit).await
    }

    async fn server_index(
        &self,
        server_type: Option<&str>,
        premium_only: bool,
        limit: u64,
    ) -> Result<Vec<Listing>, DbErr> {
        let mut query = entity::prelude::Server::find();
        query = match server_type {
            Some(server_type) => query.filter(entity::server::Column::ServerType.eq(server_type)),
            None => query.filter(
                entity::server::Column::ServerType.is_in(crate::server::model::listing::LISTED_TYPES),
            ),
        };
        if premium_only {
            query = query.filter(entity::server::Column::Premium.eq(true));
        }

        let servers = query
            .order_by_desc(entity::server::Column::Votes)
            .order_by_asc(entity::server::Column::ServerId)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(servers.into_iter().map(Listing::from_server).collect())
    }
}
