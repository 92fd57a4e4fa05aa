//! Repository for entity votes.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

/// Reason stored on votes consumed by a credit redemption.
pub const CREDIT_REDEEM_REASON: &str = "Vote credits redeemed";

pub struct VoteRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VoteRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets the creation times of a user's non-void votes on a target, newest first.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the voter
    /// - `target_type` - Type of the voted entity
    /// - `target_id` - Identifier of the voted entity
    ///
    /// # Returns
    /// - `Ok(Vec<DateTime<Utc>>)` - Vote timestamps in descending order
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_user_vote_times(
        &self,
        user_id: &str,
        target_type: &str,
        target_id: &str,
    ) -> Result<Vec<DateTime<Utc>>, DbErr> {
        entity::prelude::EntityVote::find()
            .select_only()
            .column(entity::entity_vote::Column::CreatedAt)
            .filter(entity::entity_vote::Column::Author.eq(user_id))
            .filter(entity::entity_vote::Column::TargetType.eq(target_type))
            .filter(entity::entity_vote::Column::TargetId.eq(target_id))
            .filter(entity::entity_vote::Column::Void.eq(false))
            .order_by_desc(entity::entity_vote::Column::CreatedAt)
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Inserts `count` vote rows numbered from 1 for one vote action.
    pub async fn insert_votes(
        &self,
        user_id: &str,
        target_type: &str,
        target_id: &str,
        upvote: bool,
        count: u32,
        now: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        let rows = (1..=count).map(|vote_num| entity::entity_vote::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            target_type: ActiveValue::Set(target_type.to_string()),
            target_id: ActiveValue::Set(target_id.to_string()),
            author: ActiveValue::Set(user_id.to_string()),
            upvote: ActiveValue::Set(upvote),
            void: ActiveValue::Set(false),
            void_reason: ActiveValue::Set(None),
            voided_at: ActiveValue::Set(None),
            credit_redeem: ActiveValue::Set(None),
            vote_num: ActiveValue::Set(vote_num as i32),
            created_at: ActiveValue::Set(now),
        });

        entity::prelude::EntityVote::insert_many(rows)
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }

    /// Counts the non-void upvotes and downvotes of a target.
    ///
    /// # Returns
    /// - `Ok((upvotes, downvotes))` - Counts over non-void votes
    /// - `Err(DbErr)` - Database error during query
    pub async fn count_votes(&self, target_type: &str, target_id: &str) -> Result<(u64, u64), DbErr> {
        let upvotes = self.count_direction(target_type, target_id, true).await?;
        let downvotes = self.count_direction(target_type, target_id, false).await?;
        Ok((upvotes, downvotes))
    }

    async fn count_direction(
        &self,
        target_type: &str,
        target_id: &str,
        upvote: bool,
    ) -> Result<u64, DbErr> {
        entity::prelude::EntityVote::find()
            .filter(entity::entity_vote::Column::TargetType.eq(target_type))
            .filter(entity::entity_vote::Column::TargetId.eq(target_id))
            .filter(entity::entity_vote::Column::Void.eq(false))
            .filter(entity::entity_vote::Column::Upvote.eq(upvote))
            .count(self.db)
            .await
    }

    /// Gets the ID and direction of every non-void vote of a target.
    ///
    /// A credit redemption counts and voids exactly this set.
    ///
    /// # Returns
    /// - `Ok(Vec<(Uuid, bool)>)` - `(id, upvote)` per non-void vote
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_open_votes(
        &self,
        target_type: &str,
        target_id: &str,
    ) -> Result<Vec<(Uuid, bool)>, DbErr> {
        entity::prelude::EntityVote::find()
            .select_only()
            .column(entity::entity_vote::Column::Id)
            .column(entity::entity_vote::Column::Upvote)
            .filter(entity::entity_vote::Column::TargetType.eq(target_type))
            .filter(entity::entity_vote::Column::TargetId.eq(target_id))
            .filter(entity::entity_vote::Column::Void.eq(false))
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Voids the given votes and links them to a redeem log.
    ///
    /// Votes already voided are left untouched, so the returned count tells the caller
    /// whether a concurrent redemption claimed any of them first.
    ///
    /// # Arguments
    /// - `vote_ids` - Votes counted into the redemption
    /// - `redeem_id` - ID of the redeem log row
    /// - `now` - Timestamp stored in `voided_at`
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of votes voided by this call
    /// - `Err(DbErr)` - Database error during update
    pub async fn void_for_redeem(
        &self,
        vote_ids: Vec<Uuid>,
        redeem_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::EntityVote::update_many()
            .filter(entity::entity_vote::Column::Id.is_in(vote_ids))
            .filter(entity::entity_vote::Column::Void.eq(false))
            .col_expr(entity::entity_vote::Column::Void, Expr::value(true))
            .col_expr(
                entity::entity_vote::Column::VoidReason,
                Expr::value(CREDIT_REDEEM_REASON),
            )
            .col_expr(entity::entity_vote::Column::VoidedAt, Expr::value(now))
            .col_expr(entity::entity_vote::Column::CreditRedeem, Expr::value(redeem_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
