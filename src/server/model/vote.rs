//! Vote domain models.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::model::vote::{UserVoteDto, VoteInfoDto, VoteWaitDto};

/// Voting rules for one entity at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteInfo {
    /// Vote rows recorded per vote action.
    pub per_user: u32,
    /// Cooldown between votes in hours.
    pub vote_time: u32,
    pub multiple_votes: bool,
    pub vote_credits: bool,
    pub supports_upvotes: bool,
    pub supports_downvotes: bool,
}

impl Default for VoteInfo {
    fn default() -> Self {
        Self {
            per_user: 1,
            vote_time: 12,
            multiple_votes: true,
            vote_credits: false,
            supports_upvotes: true,
            supports_downvotes: true,
        }
    }
}

impl VoteInfo {
    pub fn into_dto(self) -> VoteInfoDto {
        VoteInfoDto {
            per_user: self.per_user,
            vote_time: self.vote_time,
            multiple_votes: self.multiple_votes,
            vote_credits: self.vote_credits,
            supports_upvotes: self.supports_upvotes,
            supports_downvotes: self.supports_downvotes,
        }
    }
}

/// Time left until the next vote is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteWait {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl VoteWait {
    /// Splits a remaining duration into hours, minutes and seconds.
    pub fn from_duration(remaining: Duration) -> Self {
        let total = remaining.num_seconds().max(0);
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }

    pub fn into_dto(self) -> VoteWaitDto {
        VoteWaitDto {
            hours: self.hours,
            minutes: self.minutes,
            seconds: self.seconds,
        }
    }
}

impl fmt::Display for VoteWait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02} hours, {:02} minutes. {:02} seconds",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// A user's voting state for one entity.
#[derive(Debug, Clone)]
pub struct UserVoteStatus {
    pub has_voted: bool,
    /// Creation times of the non-void votes still inside the cooldown window.
    pub valid_votes: Vec<DateTime<Utc>>,
    pub vote_info: VoteInfo,
    pub wait: Option<VoteWait>,
}

impl UserVoteStatus {
    pub fn into_dto(self) -> UserVoteDto {
        UserVoteDto {
            has_voted: self.has_voted,
            valid_votes: self.valid_votes,
            vote_info: self.vote_info.into_dto(),
            wait: self.wait.map(VoteWait::into_dto),
        }
    }
}

/// Display data of a votable entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityInfo {
    pub name: String,
    pub url: String,
    pub vote_url: String,
    pub avatar: String,
}

/// Result of a recorded vote, used for the vote log and webhooks.
#[derive(Debug, Clone)]
pub struct CastVote {
    pub user_id: String,
    pub target_type: String,
    pub target_id: String,
    pub upvote: bool,
    /// Vote count after the vote.
    pub votes: i64,
    pub per_user: u32,
    pub entity: EntityInfo,
}
