use sea_orm::entity::prelude::*;

use crate::types::StringList;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "api_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    /// `login` or `api`.
    #[sea_orm(column_name = "type")]
    pub session_type: String,
    pub scope: String,
    pub target_type: String,
    pub target_id: String,
    pub perm_limits: StringList,
    #[sea_orm(unique)]
    pub token: String,
    pub expiry: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
