//! Vote credit slabs and redemption.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{credit::CreditRepository, vote::VoteRepository},
    error::{vote::VoteError, AppError},
    model::{
        auth::TargetType,
        credit::{CreditSummary, RedeemLog, RedeemLogSummary, VoteCreditTier},
    },
    service::vote::vote_info,
};

/// Splits `votes` across tiers ordered by position.
///
/// Tiers are filled in order up to their width; whatever remains after the last tier is
/// attributed to the last tier.
///
/// # Returns
/// - `Vec<i64>` - Votes per tier, aligned with `tiers`; empty when there are no tiers
pub fn slab_split(votes: i64, tiers: &[VoteCreditTier]) -> Vec<i64> {
    let mut remaining = votes.max(0);
    let mut slabs: Vec<i64> = tiers
        .iter()
        .map(|tier| {
            let taken = remaining.min(tier.votes.max(0));
            remaining -= taken;
            taken
        })
        .collect();

    if let Some(last) = slabs.last_mut() {
        *last += remaining;
    }

    slabs
}

/// Sums `cents × votes` over the slabs.
pub fn total_credits(tiers: &[VoteCreditTier], slabs: &[i64]) -> i64 {
    tiers
        .iter()
        .zip(slabs)
        .map(|(tier, votes)| tier.cents * votes)
        .sum()
}

pub struct CreditService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CreditService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the tiers of a target type ordered by position.
    pub async fn tiers(&self, target_type: TargetType) -> Result<Vec<VoteCreditTier>, AppError> {
        Ok(CreditRepository::new(self.db)
            .get_tiers(target_type.as_str())
            .await?)
    }

    /// Computes the credits an entity could redeem now.
    ///
    /// # Returns
    /// - `Ok(CreditSummary)` - Tiers, counted votes, per-tier split and total
    /// - `Err(AppError::VoteErr(CreditsNotSupported))` - The entity type does not earn credits
    pub async fn summary(
        &self,
        target_type: TargetType,
        target_id: &str,
        now: DateTime<Utc>,
    ) -> Result<CreditSummary, AppError> {
        ensure_credits_supported(target_type, now)?;

        let (summary, _) = compute_summary(self.db, target_type, target_id, now).await?;
        Ok(summary)
    }

    /// Redeems every credit an entity has accrued.
    ///
    /// Inserts a redeem log and voids every non-void vote of the entity, downvotes included,
    /// in one transaction.
    /// If a concurrent redemption voided any of those votes first, nothing is stored.
    ///
    /// # Returns
    /// - `Ok(RedeemLog)` - The new log row
    /// - `Err(AppError::VoteErr(NothingToRedeem))` - No credits accrued since the last redemption
    /// - `Err(AppError::VoteErr(CreditsNotSupported))` - The entity type does not earn credits
    /// - `Err(AppError::Conflict(_))` - Lost a race against another redemption
    pub async fn redeem(
        &self,
        target_type: TargetType,
        target_id: &str,
        now: DateTime<Utc>,
    ) -> Result<RedeemLog, AppError> {
        ensure_credits_supported(target_type, now)?;

        let txn = self.db.begin().await?;

        let (summary, vote_ids) = compute_summary(&txn, target_type, target_id, now).await?;
        if summary.total_credits == 0 {
            return Err(VoteError::NothingToRedeem.into());
        }

        let log = CreditRepository::new(&txn)
            .insert_redeem_log(target_type.as_str(), target_id, summary.total_credits, now)
            .await?;

        let expected = vote_ids.len() as u64;
        let voided = VoteRepository::new(&txn)
            .void_for_redeem(vote_ids, log.id, now)
            .await?;

        if voided != expected {
            txn.rollback().await?;
            tracing::warn!(
                target_type = %target_type,
                target_id = %target_id,
                expected,
                voided,
                "Concurrent vote credit redemption"
            );
            return Err(AppError::Conflict(
                "Votes were redeemed concurrently, please try again".to_string(),
            ));
        }

        txn.commit().await?;

        tracing::info!(
            target_type = %target_type,
            target_id = %target_id,
            credits = log.credits,
            "Vote credits redeemed"
        );

        Ok(log)
    }

    /// Gets the redeem log of an entity with its totals.
    pub async fn redeem_logs(
        &self,
        target_type: TargetType,
        target_id: &str,
    ) -> Result<RedeemLogSummary, AppError> {
        let logs = CreditRepository::new(self.db)
            .get_redeem_logs(target_type.as_str(), target_id)
            .await?;

        Ok(RedeemLogSummary::from_logs(logs))
    }
}

fn ensure_credits_supported(target_type: TargetType, now: DateTime<Utc>) -> Result<(), AppError> {
    if !vote_info(target_type, false, now).vote_credits {
        return Err(VoteError::CreditsNotSupported.into());
    }

    Ok(())
}

/// Net vote count used for credits: upvotes minus downvotes, never negative.
///
/// Downvotes only count where the target type supports them.
pub fn credit_vote_count(upvotes: i64, downvotes: i64, supports_downvotes: bool) -> i64 {
    let downvotes = if supports_downvotes { downvotes } else { 0 };
    (upvotes - downvotes).max(0)
}

async fn compute_summary<C: ConnectionTrait>(
    db: &C,
    target_type: TargetType,
    target_id: &str,
    now: DateTime<Utc>,
) -> Result<(CreditSummary, Vec<uuid::Uuid>), AppError> {
    let tiers = CreditRepository::new(db)
        .get_tiers(target_type.as_str())
        .await?;
    let open_votes = VoteRepository::new(db)
        .get_open_votes(target_type.as_str(), target_id)
        .await?;

    let upvotes = open_votes.iter().filter(|(_, upvote)| *upvote).count() as i64;
    let downvotes = open_votes.len() as i64 - upvotes;
    let votes = credit_vote_count(
        upvotes,
        downvotes,
        vote_info(target_type, false, now).supports_downvotes,
    );

    let slab_overview = slab_split(votes, &tiers);
    let total_credits = total_credits(&tiers, &slab_overview);
    let vote_ids = open_votes.into_iter().map(|(id, _)| id).collect();

    Ok((
        CreditSummary {
            tiers,
            votes,
            slab_overview,
            total_credits,
        },
        vote_ids,
    ))
}

#[cfg(test)]
mod test;
