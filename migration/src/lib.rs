pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_user_table;
mod m20261001_000002_create_team_tables;
mod m20261001_000003_create_listing_tables;
mod m20261001_000004_create_api_session_table;
mod m20261001_000005_create_vote_tables;
mod m20261001_000006_create_notification_tables;
mod m20261001_000007_create_webhook_tables;
mod m20261001_000008_create_staff_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_user_table::Migration),
            Box::new(m20261001_000002_create_team_tables::Migration),
            Box::new(m20261001_000003_create_listing_tables::Migration),
            Box::new(m20261001_000004_create_api_session_table::Migration),
            Box::new(m20261001_000005_create_vote_tables::Migration),
            Box::new(m20261001_000006_create_notification_tables::Migration),
            Box::new(m20261001_000007_create_webhook_tables::Migration),
            Box::new(m20261001_000008_create_staff_tables::Migration),
        ]
    }
}
