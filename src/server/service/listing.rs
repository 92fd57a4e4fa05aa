use sea_orm::DatabaseConnection;

use crate::{
    model::{
        api::PaginatedDto,
        listing::{BotDto, ServerDto, ServerIndexDto},
    },
    server::{
        data::{listing::ListingRepository, vanity::VanityRepository},
        error::{validation::ValidationError, AppError},
        model::{auth::TargetType, listing::Listing},
    },
};

/// Servers per page and per index section.
pub const SERVERS_PER_PAGE: u64 = 12;

pub struct ListingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ListingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_server(&self, server_id: &str) -> Result<ServerDto, AppError> {
        let listing = self.find(TargetType::Server, server_id).await?;
        let vanity = self.vanity(TargetType::Server, server_id).await?;

        Ok(listing.into_server_dto(vanity))
    }

    pub async fn get_bot(&self, bot_id: &str) -> Result<BotDto, AppError> {
        let listing = self.find(TargetType::Bot, bot_id).await?;
        let vanity = self.vanity(TargetType::Bot, bot_id).await?;

        Ok(listing.into_bot_dto(vanity))
    }

    /// Gets a page of listed servers.
    ///
    /// # Arguments
    /// - `page` - One-based page number
    ///
    /// # Returns
    /// - `Ok(PaginatedDto<ServerDto>)` - The page; empty past the last page
    /// - `Err(AppError::ValidationErr(_))` - `page` is zero
    pub async fn get_servers(&self, page: u64) -> Result<PaginatedDto<ServerDto>, AppError> {
        if page == 0 {
            return Err(ValidationError::out_of_range("page", "Pages start at 1").into());
        }

        let listing_page = ListingRepository::new(self.db)
            .get_servers_paginated(page - 1, SERVERS_PER_PAGE)
            .await?;

        Ok(PaginatedDto {
            count: listing_page.count,
            per_page: listing_page.per_page,
            results: self.into_server_dtos(listing_page.results).await?,
        })
    }

    /// Gets the server index: top voted, certified and premium servers.
    pub async fn get_server_index(&self) -> Result<ServerIndexDto, AppError> {
        let repo = ListingRepository::new(self.db);

        let top_voted = repo.get_top_servers(SERVERS_PER_PAGE).await?;
        let certified = repo.get_certified_servers(SERVERS_PER_PAGE).await?;
        let premium = repo.get_premium_servers(SERVERS_PER_PAGE).await?;

        Ok(ServerIndexDto {
            top_voted: self.into_server_dtos(top_voted).await?,
            certified: self.into_server_dtos(certified).await?,
            premium: self.into_server_dtos(premium).await?,
        })
    }

    async fn find(&self, target_type: TargetType, id: &str) -> Result<Listing, AppError> {
        ListingRepository::new(self.db)
            .find(target_type, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} not found", target_type)))
    }

    async fn vanity(&self, target_type: TargetType, id: &str) -> Result<Option<String>, AppError> {
        Ok(VanityRepository::new(self.db)
            .find_by_target(target_type.as_str(), id)
            .await?
            .map(|vanity| vanity.code))
    }

    async fn into_server_dtos(&self, listings: Vec<Listing>) -> Result<Vec<ServerDto>, AppError> {
        let mut dtos = Vec::with_capacity(listings.len());
        for listing in listings {
            let vanity = self.vanity(TargetType::Server, &listing.id).await?;
            dtos.push(listing.into_server_dto(vanity));
        }

        Ok(dtos)
    }
}
