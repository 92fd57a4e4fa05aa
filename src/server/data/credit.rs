use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::credit::{RedeemLog, VoteCreditTier};

pub struct CreditRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CreditRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets the credit tiers of a target type ordered by position.
    pub async fn get_tiers(&self, target_type: &str) -> Result<Vec<VoteCreditTier>, DbErr> {
        let tiers = entity::prelude::VoteCreditTier::find()
            .filter(entity::vote_credit_tier::Column::TargetType.eq(target_type))
            .order_by_asc(entity::vote_credit_tier::Column::Position)
            .all(self.db)
            .await?;

        Ok(tiers.into_iter().map(VoteCreditTier::from_entity).collect())
    }

    /// Appends a redeem log row with nothing redeemed yet.
    ///
    /// # Arguments
    /// - `target_type` - Type of the redeeming entity
    /// - `target_id` - Identifier of the redeeming entity
    /// - `credits` - Credits accrued at the time of redemption
    /// - `now` - Creation timestamp
    ///
    /// # Returns
    /// - `Ok(RedeemLog)` - The new log row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn insert_redeem_log(
        &self,
        target_type: &str,
        target_id: &str,
        credits: i64,
        now: DateTime<Utc>,
    ) -> Result<RedeemLog, DbErr> {
        let log = entity::entity_vote_redeem_log::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            target_id: ActiveValue::Set(target_id.to_string()),
            target_type: ActiveValue::Set(target_type.to_string()),
            credits: ActiveValue::Set(credits),
            redeemed_credits: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(RedeemLog::from_entity(log))
    }

    /// Gets the redeem log of a target, newest first.
    pub async fn get_redeem_logs(
        &self,
        target_type: &str,
        target_id: &str,
    ) -> Result<Vec<RedeemLog>, DbErr> {
        let logs = entity::prelude::EntityVoteRedeemLog::find()
            .filter(entity::entity_vote_redeem_log::Column::TargetType.eq(target_type))
            .filter(entity::entity_vote_redeem_log::Column::TargetId.eq(target_id))
            .order_by_desc(entity::entity_vote_redeem_log::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(logs.into_iter().map(RedeemLog::from_entity).collect())
    }
}
