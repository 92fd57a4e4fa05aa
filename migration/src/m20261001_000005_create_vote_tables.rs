use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EntityVoteRedeemLog::Table)
                    .if_not_exists()
                    .col(uuid(EntityVoteRedeemLog::Id).primary_key())
                    .col(string(EntityVoteRedeemLog::TargetId))
                    .col(string(EntityVoteRedeemLog::TargetType))
                    .col(big_integer(EntityVoteRedeemLog::Credits))
                    .col(big_integer(EntityVoteRedeemLog::RedeemedCredits).default(0))
                    .col(
                        timestamp_with_time_zone(EntityVoteRedeemLog::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .check(
                        Expr::col(EntityVoteRedeemLog::RedeemedCredits)
                            .lte(Expr::col(EntityVoteRedeemLog::Credits)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EntityVote::Table)
                    .if_not_exists()
                    .col(uuid(EntityVote::Id).primary_key())
                    .col(string(EntityVote::TargetType))
                    .col(string(EntityVote::TargetId))
                    .col(string(EntityVote::Author))
                    .col(boolean(EntityVote::Upvote).default(true))
                    .col(boolean(EntityVote::Void).default(false))
                    .col(string_null(EntityVote::VoidReason))
                    .col(timestamp_with_time_zone_null(EntityVote::VoidedAt))
                    .col(uuid_null(EntityVote::CreditRedeem))
                    .col(integer(EntityVote::VoteNum).default(1))
                    .col(
                        timestamp_with_time_zone(EntityVote::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entity_votes_credit_redeem")
                            .from(EntityVote::Table, EntityVote::CreditRedeem)
                            .to(EntityVoteRedeemLog::Table, EntityVoteRedeemLog::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    // A redeemed vote must be void
                    .check(
                        Expr::col(EntityVote::CreditRedeem)
                            .is_null()
                            .or(Expr::col(EntityVote::Void).eq(true)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_entity_votes_target")
                    .table(EntityVote::Table)
                    .col(EntityVote::TargetType)
                    .col(EntityVote::TargetId)
                    .col(EntityVote::Void)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VoteCreditTier::Table)
                    .if_not_exists()
                    .col(uuid(VoteCreditTier::Id).primary_key())
                    .col(string(VoteCreditTier::TargetType))
                    .col(integer(VoteCreditTier::Position))
                    .col(big_integer(VoteCreditTier::Votes))
                    .col(big_integer(VoteCreditTier::Cents))
                    .col(
                        timestamp_with_time_zone(VoteCreditTier::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vote_credit_tiers_position")
                    .table(VoteCreditTier::Table)
                    .col(VoteCreditTier::TargetType)
                    .col(VoteCreditTier::Position)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VoteCreditTier::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EntityVote::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EntityVoteRedeemLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EntityVote {
    #[sea_orm(iden = "entity_votes")]
    Table,
    Id,
    TargetType,
    TargetId,
    Author,
    Upvote,
    Void,
    VoidReason,
    VoidedAt,
    CreditRedeem,
    VoteNum,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum EntityVoteRedeemLog {
    #[sea_orm(iden = "entity_vote_redeem_logs")]
    Table,
    Id,
    TargetId,
    TargetType,
    Credits,
    RedeemedCredits,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum VoteCreditTier {
    #[sea_orm(iden = "vote_credit_tiers")]
    Table,
    Id,
    TargetType,
    Position,
    Votes,
    Cents,
    CreatedAt,
}
