use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Webhook::Table)
                    .if_not_exists()
                    .col(uuid(Webhook::Id).primary_key())
                    .col(string(Webhook::TargetId))
                    .col(string(Webhook::TargetType))
                    .col(text(Webhook::Url))
                    .col(text(Webhook::Secret))
                    .col(boolean(Webhook::Broken).default(false))
                    .col(
                        timestamp_with_time_zone(Webhook::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WebhookLog::Table)
                    .if_not_exists()
                    .col(uuid(WebhookLog::Id).primary_key())
                    .col(uuid(WebhookLog::WebhookId))
                    .col(string(WebhookLog::TargetId))
                    .col(string(WebhookLog::TargetType))
                    .col(string(WebhookLog::UserId))
                    .col(text(WebhookLog::Url))
                    .col(json_binary(WebhookLog::Data))
                    .col(string(WebhookLog::State).default("PENDING"))
                    .col(integer_null(WebhookLog::StatusCode))
                    .col(text_null(WebhookLog::Response))
                    .col(integer(WebhookLog::Tries).default(0))
                    .col(
                        timestamp_with_time_zone(WebhookLog::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_webhook_logs_webhook_id")
                            .from(WebhookLog::Table, WebhookLog::WebhookId)
                            .to(Webhook::Table, Webhook::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WebhookLog::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Webhook::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Webhook {
    #[sea_orm(iden = "webhooks")]
    Table,
    Id,
    TargetId,
    TargetType,
    Url,
    Secret,
    Broken,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum WebhookLog {
    #[sea_orm(iden = "webhook_logs")]
    Table,
    Id,
    WebhookId,
    TargetId,
    TargetType,
    UserId,
    Url,
    Data,
    State,
    StatusCode,
    Response,
    Tries,
    CreatedAt,
}
