use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StaffPosition::Table)
                    .if_not_exists()
                    .col(uuid(StaffPosition::Id).primary_key())
                    .col(string_uniq(StaffPosition::Name))
                    .col(integer_uniq(StaffPosition::Index))
                    .col(json_binary(StaffPosition::Perms).default(Expr::cust("'[]'::jsonb")))
                    .col(
                        timestamp_with_time_zone(StaffPosition::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StaffMember::Table)
                    .if_not_exists()
                    .col(string(StaffMember::UserId).primary_key())
                    .col(json_binary(StaffMember::Positions).default(Expr::cust("'[]'::jsonb")))
                    .col(
                        json_binary(StaffMember::PermOverrides)
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        timestamp_with_time_zone(StaffMember::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_members_user_id")
                            .from(StaffMember::Table, StaffMember::UserId)
                            .to(User::Table, User::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StaffMember::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StaffPosition::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StaffPosition {
    #[sea_orm(iden = "staff_positions")]
    Table,
    Id,
    Name,
    Index,
    Perms,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum StaffMember {
    #[sea_orm(iden = "staff_members")]
    Table,
    UserId,
    Positions,
    PermOverrides,
    CreatedAt,
}
