use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VoteInfoDto {
    pub per_user: u32,
    pub vote_time: u32,
    pub multiple_votes: bool,
    pub vote_credits: bool,
    pub supports_upvotes: bool,
    pub supports_downvotes: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VoteWaitDto {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Whether a user may vote for an entity right now.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserVoteDto {
    pub has_voted: bool,
    pub valid_votes: Vec<DateTime<Utc>>,
    pub vote_info: VoteInfoDto,
    pub wait: Option<VoteWaitDto>,
}
