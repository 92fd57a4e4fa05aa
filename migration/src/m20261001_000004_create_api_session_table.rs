use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApiSession::Table)
                    .if_not_exists()
                    .col(uuid(ApiSession::Id).primary_key())
                    .col(string_null(ApiSession::Name))
                    .col(string(ApiSession::Type))
                    .col(string(ApiSession::Scope).default("normal"))
                    .col(string(ApiSession::TargetType))
                    .col(string(ApiSession::TargetId))
                    .col(json_binary(ApiSession::PermLimits).default(Expr::cust("'[]'::jsonb")))
                    .col(string_uniq(ApiSession::Token))
                    .col(timestamp_with_time_zone(ApiSession::Expiry))
                    .col(
                        timestamp_with_time_zone(ApiSession::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_api_sessions_target")
                    .table(ApiSession::Table)
                    .col(ApiSession::TargetType)
                    .col(ApiSession::TargetId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApiSession::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ApiSession {
    #[sea_orm(iden = "api_sessions")]
    Table,
    Id,
    Name,
    Type,
    Scope,
    TargetType,
    TargetId,
    PermLimits,
    Token,
    Expiry,
    CreatedAt,
}
