use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000002_create_team_tables::Team;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bot::Table)
                    .if_not_exists()
                    .col(string(Bot::BotId).primary_key())
                    .col(string(Bot::Name))
                    .col(string_null(Bot::Owner))
                    .col(uuid_null(Bot::TeamOwner))
                    .col(string(Bot::Type).default("pending"))
                    .col(boolean(Bot::Premium).default(false))
                    .col(
                        timestamp_with_time_zone(Bot::StartPremiumPeriod)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(big_integer(Bot::PremiumPeriodLength).default(2_592_000))
                    .col(boolean(Bot::VoteBanned).default(false))
                    .col(big_integer(Bot::Votes).default(0))
                    .col(string_uniq(Bot::ApiToken))
                    .col(
                        timestamp_with_time_zone(Bot::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bots_team_owner")
                            .from(Bot::Table, Bot::TeamOwner)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Server::Table)
                    .if_not_exists()
                    .col(string(Server::ServerId).primary_key())
                    .col(string(Server::Name))
                    .col(string_null(Server::Owner))
                    .col(uuid_null(Server::TeamOwner))
                    .col(string(Server::Type).default("approved"))
                    .col(boolean(Server::Premium).default(false))
                    .col(
                        timestamp_with_time_zone(Server::StartPremiumPeriod)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(big_integer(Server::PremiumPeriodLength).default(2_592_000))
                    .col(boolean(Server::VoteBanned).default(false))
                    .col(big_integer(Server::Votes).default(0))
                    .col(string_uniq(Server::ApiToken))
                    .col(
                        timestamp_with_time_zone(Server::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_servers_team_owner")
                            .from(Server::Table, Server::TeamOwner)
                            .to(Team::Table, Team::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pack::Table)
                    .if_not_exists()
                    .col(string(Pack::Url).primary_key())
                    .col(string(Pack::Name))
                    .col(string(Pack::Owner))
                    .col(big_integer(Pack::Votes).default(0))
                    .col(
                        timestamp_with_time_zone(Pack::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Vanity::Table)
                    .if_not_exists()
                    .col(pk_auto(Vanity::Id))
                    .col(string(Vanity::TargetId))
                    .col(string(Vanity::TargetType))
                    .col(string_uniq(Vanity::Code))
                    .col(
                        timestamp_with_time_zone(Vanity::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vanity::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pack::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Server::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bot::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Bot {
    #[sea_orm(iden = "bots")]
    Table,
    BotId,
    Name,
    Owner,
    TeamOwner,
    Type,
    Premium,
    StartPremiumPeriod,
    PremiumPeriodLength,
    VoteBanned,
    Votes,
    ApiToken,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Server {
    #[sea_orm(iden = "servers")]
    Table,
    ServerId,
    Name,
    Owner,
    TeamOwner,
    Type,
    Premium,
    StartPremiumPeriod,
    PremiumPeriodLength,
    VoteBanned,
    Votes,
    ApiToken,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Pack {
    #[sea_orm(iden = "packs")]
    Table,
    Url,
    Name,
    Owner,
    Votes,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Vanity {
    #[sea_orm(iden = "vanity")]
    Table,
    Id,
    TargetId,
    TargetType,
    Code,
    CreatedAt,
}
