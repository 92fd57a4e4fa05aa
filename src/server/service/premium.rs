//! Premium expiry.
//!
//! The sweep only finds lapsed listings and queues them; the demote worker clears the
//! flag and tells the bot-logs channel and the owners. Demotion is idempotent, so a
//! listing queued twice is announced once.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tokio::sync::mpsc;

use crate::server::{
    data::{listing::ListingRepository, team::TeamRepository},
    error::AppError,
    model::{auth::TargetType, listing::Listing},
    perms::{self, GLOBAL_WILDCARD},
    service::discord::{DiscordEmbed, DiscordSink, PREMIUM_COLOR},
};

/// Capacity of the demotion channel.
pub const DEMOTE_CHANNEL_CAPACITY: usize = 512;

/// Premium window written on demotion, 30 days in seconds.
pub const PREMIUM_RESET_PERIOD: i64 = 30 * 24 * 60 * 60;

/// A listing whose premium has lapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demotion {
    pub target_type: TargetType,
    pub id: String,
}

pub struct PremiumService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PremiumService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Queues every premium bot and server whose premium has lapsed at `now`.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of listings queued
    /// - `Err(AppError::DbErr(_))` - Failed to read premium listings
    /// - `Err(AppError::InternalError(_))` - The demote worker is gone
    pub async fn sweep(
        &self,
        demote_tx: &mpsc::Sender<Demotion>,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        let expired: Vec<Listing> = ListingRepository::new(self.db)
            .get_premium()
            .await?
            .into_iter()
            .filter(|listing| listing.premium_expired(now))
            .collect();

        let queued = expired.len();
        for listing in expired {
            tracing::info!(
                target_type = %listing.target_type,
                id = %listing.id,
                review_type = %listing.review_type,
                "Premium lapsed"
            );

            demote_tx
                .send(Demotion {
                    target_type: listing.target_type,
                    id: listing.id,
                })
                .await
                .map_err(|_| AppError::InternalError("Demote channel closed".to_string()))?;
        }

        Ok(queued)
    }

    /// Demotes one listing and announces it if this call changed it.
    ///
    /// # Arguments
    /// - `discord` - Where announcements go
    /// - `bot_logs_channel_id` - Channel receiving the public notice
    /// - `demotion` - The lapsed listing
    /// - `now` - Start of the reset premium window
    ///
    /// # Returns
    /// - `Ok(true)` - The listing was demoted and announced
    /// - `Ok(false)` - Already demoted or missing
    /// - `Err(AppError::DbErr(_))` - Database error; the listing keeps its flag
    pub async fn demote(
        &self,
        discord: &dyn DiscordSink,
        bot_logs_channel_id: u64,
        demotion: &Demotion,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let repo = ListingRepository::new(self.db);

        let Some(listing) = repo.find(demotion.target_type, &demotion.id).await? else {
            return Ok(false);
        };

        let changed = repo
            .demote_premium(demotion.target_type, &demotion.id, now, PREMIUM_RESET_PERIOD)
            .await?;
        if !changed {
            return Ok(false);
        }

        let reason = if listing.is_listed() {
            "its premium subscription has expired"
        } else {
            "it is no longer approved or certified"
        };

        let notice = DiscordEmbed::new(
            "Premium Removed",
            format!(
                "{} <@{}> ({}) has been removed from the premium list as {}.",
                listing.target_type, listing.id, listing.name, reason
            ),
            PREMIUM_COLOR,
        )
        .field("Owner", owner_mention(&listing), true);

        if let Err(e) = discord.send_channel(bot_logs_channel_id, notice).await {
            tracing::error!(id = %listing.id, "Failed to send premium notice: {}", e);
        }

        for user_id in self.owners(&listing).await? {
            let dm = DiscordEmbed::new(
                "Premium Removed",
                format!(
                    "Your {} {} has been removed from the premium list as {}.",
                    listing.target_type, listing.name, reason
                ),
                PREMIUM_COLOR,
            );

            if let Err(e) = discord.send_dm(&user_id, dm).await {
                tracing::warn!(id = %listing.id, user_id = %user_id, "Failed to DM owner: {}", e);
            }
        }

        Ok(true)
    }

    /// The user owner, or every team member holding `global.*`.
    async fn owners(&self, listing: &Listing) -> Result<Vec<String>, AppError> {
        if let Some(owner) = &listing.owner {
            return Ok(vec![owner.clone()]);
        }

        let Some(team_id) = listing.team_owner else {
            return Ok(Vec::new());
        };

        let members = TeamRepository::new(self.db).get_members(team_id).await?;

        Ok(members
            .into_iter()
            .filter(|member| perms::has_perm(&perms::resolve_flags(&member.flags), GLOBAL_WILDCARD))
            .map(|member| member.user_id)
            .collect())
    }
}

fn owner_mention(listing: &Listing) -> String {
    match (&listing.owner, listing.team_owner) {
        (Some(owner), _) => format!("<@{}>", owner),
        (None, Some(team_id)) => format!("Team {}", team_id),
        (None, None) => "Unknown".to_string(),
    }
}

/// Demotes queued listings until every sender is dropped.
pub async fn run_demote_worker(
    db: DatabaseConnection,
    discord: Arc<dyn DiscordSink>,
    bot_logs_channel_id: u64,
    mut rx: mpsc::Receiver<Demotion>,
) {
    let service = PremiumService::new(&db);

    while let Some(demotion) = rx.recv().await {
        if let Err(e) = service
            .demote(discord.as_ref(), bot_logs_channel_id, &demotion, Utc::now())
            .await
        {
            tracing::error!(
                target_type = %demotion.target_type,
                id = %demotion.id,
                "Failed to demote premium listing: {}",
                e
            );
        }
    }

    tracing::info!("Demote worker stopped");
}
