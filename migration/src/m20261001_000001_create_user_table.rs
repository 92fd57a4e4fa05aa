use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string(User::UserId).primary_key())
                    .col(string(User::Username))
                    .col(boolean(User::Banned).default(false))
                    .col(boolean(User::VoteBanned).default(false))
                    .col(json_binary(User::Experiments).default(Expr::cust("'[]'::jsonb")))
                    .col(json_binary(User::ExtraLinks).default(Expr::cust("'[]'::jsonb")))
                    .col(string_uniq(User::ApiToken))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(User::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    #[sea_orm(iden = "users")]
    Table,
    UserId,
    Username,
    Banned,
    VoteBanned,
    Experiments,
    ExtraLinks,
    ApiToken,
    CreatedAt,
    UpdatedAt,
}
