use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "servers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub server_id: String,
    pub name: String,
    pub owner: Option<String>,
    pub team_owner: Option<Uuid>,
    #[sea_orm(column_name = "type")]
    pub server_type: String,
    pub premium: bool,
    pub start_premium_period: DateTimeUtc,
    /// Length of the premium window in seconds.
    pub premium_period_length: i64,
    pub vote_banned: bool,
    pub votes: i64,
    #[sea_orm(unique)]
    pub api_token: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
