use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VoteCreditTierDto {
    pub id: String,
    pub target_type: String,
    pub position: i32,
    pub votes: i64,
    pub cents: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VoteCreditSummaryDto {
    pub tiers: Vec<VoteCreditTierDto>,
    pub votes: i64,
    pub slab_overview: Vec<i64>,
    pub total_credits: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RedeemLogDto {
    pub id: String,
    pub target_id: String,
    pub target_type: String,
    pub credits: i64,
    pub redeemed_credits: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RedeemLogSummaryDto {
    pub logs: Vec<RedeemLogDto>,
    pub total_credits: i64,
    pub redeemed_credits: i64,
    pub available: i64,
}
