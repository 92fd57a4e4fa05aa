//! Vote credit domain models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::credit::{
    RedeemLogDto, RedeemLogSummaryDto, VoteCreditSummaryDto, VoteCreditTierDto,
};

/// One slab of the credit schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteCreditTier {
    pub id: Uuid,
    pub target_type: String,
    pub position: i32,
    /// Width of the slab in votes.
    pub votes: i64,
    /// Credit per vote inside the slab.
    pub cents: i64,
    pub created_at: DateTime<Utc>,
}

impl VoteCreditTier {
    pub fn from_entity(entity: entity::vote_credit_tier::Model) -> Self {
        Self {
            id: entity.id,
            target_type: entity.target_type,
            position: entity.position,
            votes: entity.votes,
            cents: entity.cents,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> VoteCreditTierDto {
        VoteCreditTierDto {
            id: self.id.to_string(),
            target_type: self.target_type,
            position: self.position,
            votes: self.votes,
            cents: self.cents,
            created_at: self.created_at,
        }
    }
}

/// Credits an entity could redeem right now.
#[derive(Debug, Clone)]
pub struct CreditSummary {
    pub tiers: Vec<VoteCreditTier>,
    pub votes: i64,
    /// Votes attributed to each tier, aligned with `tiers`.
    pub slab_overview: Vec<i64>,
    pub total_credits: i64,
}

impl CreditSummary {
    pub fn into_dto(self) -> VoteCreditSummaryDto {
        VoteCreditSummaryDto {
            tiers: self
                .tiers
                .into_iter()
                .map(VoteCreditTier::into_dto)
                .collect(),
            votes: self.votes,
            slab_overview: self.slab_overview,
            total_credits: self.total_credits,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedeemLog {
    pub id: Uuid,
    pub target_id: String,
    pub target_type: String,
    pub credits: i64,
    pub redeemed_credits: i64,
    pub created_at: DateTime<Utc>,
}

impl RedeemLog {
    pub fn from_entity(entity: entity::entity_vote_redeem_log::Model) -> Self {
        Self {
            id: entity.id,
            target_id: entity.target_id,
            target_type: entity.target_type,
            credits: entity.credits,
            redeemed_credits: entity.redeemed_credits,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> RedeemLogDto {
        RedeemLogDto {
            id: self.id.to_string(),
            target_id: self.target_id,
            target_type: self.target_type,
            credits: self.credits,
            redeemed_credits: self.redeemed_credits,
            created_at: self.created_at,
        }
    }
}

/// Totals across an entity's redeem log.
#[derive(Debug, Clone)]
pub struct RedeemLogSummary {
    pub logs: Vec<RedeemLog>,
    pub total_credits: i64,
    pub redeemed_credits: i64,
    pub available: i64,
}

impl RedeemLogSummary {
    /// Accumulates the totals of the given log rows.
    pub fn from_logs(logs: Vec<RedeemLog>) -> Self {
        let total_credits: i64 = logs.iter().map(|log| log.credits).sum();
        let redeemed_credits: i64 = logs.iter().map(|log| log.redeemed_credits).sum();

        Self {
            logs,
            total_credits,
            redeemed_credits,
            available: (total_credits - redeemed_credits).max(0),
        }
    }

    pub fn into_dto(self) -> RedeemLogSummaryDto {
        RedeemLogSummaryDto {
            logs: self.logs.into_iter().map(RedeemLog::into_dto).collect(),
            total_credits: self.total_credits,
            redeemed_credits: self.redeemed_credits,
            available: self.available,
        }
    }
}
