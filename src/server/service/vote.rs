//! Vote rules, eligibility and casting.
//!
//! Each vote action inserts `per_user` rows. The cached `votes` column of the entity is
//! recomputed from the non-void rows in the same transaction.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    config::Config,
    data::{listing::ListingRepository, user::UserRepository, vote::VoteRepository},
    error::{vote::VoteError, AppError},
    model::{
        auth::TargetType,
        vote::{CastVote, UserVoteStatus, VoteInfo, VoteWait},
    },
    service::{
        discord::{DiscordEmbed, DiscordSink, VOTE_LOG_COLOR},
        entity_info::EntityInfoService,
        webhook::WebhookService,
    },
};

/// Cooldown of premium bots and servers, in hours.
const PREMIUM_VOTE_TIME: u32 = 4;

/// Cooldown of weekend double votes, in hours.
const WEEKEND_VOTE_TIME: u32 = 6;

fn is_weekend(now: DateTime<Utc>) -> bool {
    matches!(now.weekday(), Weekday::Fri | Weekday::Sat | Weekday::Sun)
}

/// Derives the voting rules of an entity.
///
/// # Arguments
/// - `target_type` - Type of the voted entity
/// - `premium` - Whether the entity currently holds premium
/// - `now` - Current time; Friday to Sunday doubles votes
pub fn vote_info(target_type: TargetType, premium: bool, now: DateTime<Utc>) -> VoteInfo {
    let mut info = VoteInfo::default();

    let weekend_double = |info: &mut VoteInfo| {
        if is_weekend(now) {
            info.per_user = 2;
            info.vote_time = WEEKEND_VOTE_TIME;
        }
    };

    match target_type {
        TargetType::Bot | TargetType::Server => {
            info.vote_credits = true;
            info.supports_downvotes = target_type == TargetType::Server;

            if premium {
                info.vote_time = PREMIUM_VOTE_TIME;
            } else {
                weekend_double(&mut info);
            }
        }
        TargetType::Blog => {
            info.multiple_votes = false;
            info.per_user = 1;
        }
        TargetType::Team | TargetType::Pack => weekend_double(&mut info),
        TargetType::User => {}
    }

    info
}

/// Computes a user's voting state from their non-void vote times, newest first.
///
/// A newest vote dated in the future is logged and still treated as active.
pub fn vote_status(
    vote_info: VoteInfo,
    vote_times: Vec<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> UserVoteStatus {
    if !vote_info.multiple_votes {
        return UserVoteStatus {
            has_voted: !vote_times.is_empty(),
            valid_votes: vote_times,
            vote_info,
            wait: None,
        };
    }

    let window = Duration::hours(i64::from(vote_info.vote_time));

    let Some(latest) = vote_times.first().copied() else {
        return UserVoteStatus {
            has_voted: false,
            valid_votes: Vec::new(),
            vote_info,
            wait: None,
        };
    };

    if latest > now {
        tracing::warn!(
            latest = %latest,
            now = %now,
            "Latest vote is dated in the future"
        );
    }

    let elapsed = now - latest;
    if elapsed >= window {
        return UserVoteStatus {
            has_voted: false,
            valid_votes: Vec::new(),
            vote_info,
            wait: None,
        };
    }

    let valid_votes = vote_times
        .into_iter()
        .filter(|time| now - *time < window)
        .collect();

    UserVoteStatus {
        has_voted: true,
        valid_votes,
        vote_info,
        wait: Some(VoteWait::from_duration(window - elapsed)),
    }
}

pub struct VoteService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> VoteService<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Gets the voting rules of an entity right now.
    pub async fn info(&self, target_type: TargetType, target_id: &str, now: DateTime<Utc>) -> Result<VoteInfo, AppError> {
        let premium = match target_type {
            TargetType::Bot | TargetType::Server => ListingRepository::new(self.db)
                .find(target_type, target_id)
                .await?
                .is_some_and(|listing| listing.premium),
            _ => false,
        };

        Ok(vote_info(target_type, premium, now))
    }

    /// Gets whether a user may vote for an entity and how long they must wait.
    pub async fn status(
        &self,
        user_id: &str,
        target_type: TargetType,
        target_id: &str,
        now: DateTime<Utc>,
    ) -> Result<UserVoteStatus, AppError> {
        let info = self.info(target_type, target_id, now).await?;
        let times = VoteRepository::new(self.db)
            .get_user_vote_times(user_id, target_type.as_str(), target_id)
            .await?;

        Ok(vote_status(info, times, now))
    }

    /// Records a vote.
    ///
    /// The caller must already be authenticated as `user_id`.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the voter
    /// - `target_type` - Type of the voted entity
    /// - `target_id` - Identifier of the voted entity
    /// - `upvote` - `false` for a downvote
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(CastVote)` - The vote was stored; carries the new count for logs and webhooks
    /// - `Err(AppError::VoteErr(_))` - Vote banned, unsupported direction or cooldown
    /// - `Err(AppError::NotFound(_))` - The entity does not exist
    /// - `Err(AppError::DbErr(_))` - Database error; nothing was stored
    pub async fn cast(
        &self,
        user_id: &str,
        target_type: TargetType,
        target_id: &str,
        upvote: bool,
        now: DateTime<Utc>,
    ) -> Result<CastVote, AppError> {
        let vote_banned = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .is_some_and(|user| user.vote_banned);
        if vote_banned {
            return Err(VoteError::VoteBanned.into());
        }

        let entity = EntityInfoService::new(self.db, self.config)
            .resolve(target_type, target_id)
            .await?;

        let status = self.status(user_id, target_type, target_id, now).await?;
        let info = status.vote_info;

        if upvote && !info.supports_upvotes {
            return Err(VoteError::UnsupportedDirection("upvotes").into());
        }
        if !upvote && !info.supports_downvotes {
            return Err(VoteError::UnsupportedDirection("downvotes").into());
        }

        if status.has_voted {
            return Err(match status.wait {
                None => VoteError::AlreadyVoted,
                Some(wait) if status.valid_votes.len() > 1 => VoteError::DoubleVoteCooldown(wait),
                Some(wait) => VoteError::Cooldown(wait),
            }
            .into());
        }

        let txn = self.db.begin().await?;

        let vote_repo = VoteRepository::new(&txn);
        vote_repo
            .insert_votes(user_id, target_type.as_str(), target_id, upvote, info.per_user, now)
            .await?;

        let (upvotes, downvotes) = vote_repo
            .count_votes(target_type.as_str(), target_id)
            .await?;
        let downvotes = if info.supports_downvotes { downvotes } else { 0 };
        let votes = upvotes as i64 - downvotes as i64;

        ListingRepository::new(&txn)
            .set_votes(target_type, target_id, votes)
            .await?;

        txn.commit().await?;

        tracing::info!(
            user_id = %user_id,
            target_type = %target_type,
            target_id = %target_id,
            votes,
            "Vote recorded"
        );

        Ok(CastVote {
            user_id: user_id.to_string(),
            target_type: target_type.to_string(),
            target_id: target_id.to_string(),
            upvote,
            votes,
            per_user: info.per_user,
            entity,
        })
    }
}

fn vote_log_embed(vote: &CastVote) -> DiscordEmbed {
    DiscordEmbed::new(
        "🎉 Vote Count Updated!",
        format!(
            ":heart: <@{}> has voted for {}: {}",
            vote.user_id, vote.target_type, vote.entity.name
        ),
        VOTE_LOG_COLOR,
    )
    .url(&vote.entity.url)
    .thumbnail(&vote.entity.avatar)
    .field("Vote Count:", vote.votes.to_string(), true)
    .field("Votes Added:", vote.per_user.to_string(), true)
    .field("User ID:", &vote.user_id, true)
    .field(
        format!("View {}'s page", vote.target_type),
        format!("[View {}]({})", vote.entity.name, vote.entity.url),
        true,
    )
    .field(
        "Vote Page",
        format!("[Vote for {}]({})", vote.entity.name, vote.entity.vote_url),
        true,
    )
}

/// Posts the vote log and fires the entity's webhooks after a vote commits.
///
/// Runs detached from the request; failures are only logged.
pub async fn publish_vote(
    db: DatabaseConnection,
    http_client: reqwest::Client,
    discord: Arc<dyn DiscordSink>,
    vote_log_channel_id: u64,
    vote: CastVote,
) {
    if let Err(e) = discord
        .send_channel(vote_log_channel_id, vote_log_embed(&vote))
        .await
    {
        tracing::error!(
            target_id = %vote.target_id,
            target_type = %vote.target_type,
            "Failed to send vote log message: {}",
            e
        );
    }

    if let Err(e) = WebhookService::new(&db, &http_client)
        .dispatch_vote(&vote)
        .await
    {
        tracing::error!(
            target_id = %vote.target_id,
            target_type = %vote.target_type,
            "Failed to dispatch vote webhooks: {}",
            e
        );
    }
}
