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
                    .table(UserNotification::Table)
                    .if_not_exists()
                    .col(string(UserNotification::NotifId).primary_key())
                    .col(string(UserNotification::UserId))
                    .col(text(UserNotification::Auth))
                    .col(text(UserNotification::P256dh))
                    .col(text(UserNotification::Endpoint))
                    .col(text(UserNotification::Ua))
                    .col(
                        timestamp_with_time_zone(UserNotification::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_notifications_user_id")
                            .from(UserNotification::Table, UserNotification::UserId)
                            .to(User::Table, User::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserReminder::Table)
                    .if_not_exists()
                    .col(pk_auto(UserReminder::Id))
                    .col(string(UserReminder::UserId))
                    .col(string(UserReminder::TargetId))
                    .col(string(UserReminder::TargetType))
                    .col(
                        timestamp_with_time_zone(UserReminder::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(UserReminder::LastAcked)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_reminders_user_id")
                            .from(UserReminder::Table, UserReminder::UserId)
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
            .drop_table(Table::drop().table(UserReminder::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserNotification::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserNotification {
    #[sea_orm(iden = "user_notifications")]
    Table,
    NotifId,
    UserId,
    Auth,
    P256dh,
    Endpoint,
    Ua,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum UserReminder {
    #[sea_orm(iden = "user_reminders")]
    Table,
    Id,
    UserId,
    TargetId,
    TargetType,
    CreatedAt,
    LastAcked,
}
