use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter,
};

pub struct VanityRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VanityRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<entity::vanity::Model>, DbErr> {
        entity::prelude::Vanity::find()
            .filter(entity::vanity::Column::Code.eq(code))
            .one(self.db)
            .await
    }

    pub async fn find_by_target(
        &self,
        target_type: &str,
        target_id: &str,
    ) -> Result<Option<entity::vanity::Model>, DbErr> {
        entity::prelude::Vanity::find()
            .filter(entity::vanity::Column::TargetType.eq(target_type))
            .filter(entity::vanity::Column::TargetId.eq(target_id))
            .one(self.db)
            .await
    }

    /// Sets the vanity code of a target, creating the row if the target has none.
    ///
    /// # Arguments
    /// - `target_type` - Type of the entity
    /// - `target_id` - Identifier of the entity
    /// - `code` - Normalised vanity code
    /// - `now` - Creation timestamp for new rows
    ///
    /// # Returns
    /// - `Ok(())` - The code was stored
    /// - `Err(DbErr)` - Database error, including a unique violation on `code`
    pub async fn upsert(
        &self,
        target_type: &str,
        target_id: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        let result = entity::prelude::Vanity::update_many()
            .filter(entity::vanity::Column::TargetType.eq(target_type))
            .filter(entity::vanity::Column::TargetId.eq(target_id))
            .col_expr(entity::vanity::Column::Code, Expr::value(code))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            entity::vanity::ActiveModel {
                target_id: ActiveValue::Set(target_id.to_string()),
                target_type: ActiveValue::Set(target_type.to_string()),
                code: ActiveValue::Set(code.to_string()),
                created_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }
}
