use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

use entity::types::StringList;

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds a user by Discord ID.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the user
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id.to_string())
            .one(self.db)
            .await
    }

    /// Finds a user by their long-lived API token.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::ApiToken.eq(token))
            .one(self.db)
            .await
    }

    /// Creates a user on first login or refreshes the username of an existing one.
    ///
    /// Ban flags, experiments and the API token of an existing user are left untouched.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the user
    /// - `username` - Current Discord username
    /// - `api_token` - Token to assign if the user is new
    /// - `now` - Timestamp for `created_at`/`updated_at`
    ///
    /// # Returns
    /// - `Ok(Model)` - The stored user after the upsert
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert_login(
        &self,
        user_id: &str,
        username: &str,
        api_token: String,
        now: DateTime<Utc>,
    ) -> Result<entity::user::Model, DbErr> {
        entity::prelude::User::insert(entity::user::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            username: ActiveValue::Set(username.to_string()),
            banned: ActiveValue::Set(false),
            vote_banned: ActiveValue::Set(false),
            experiments: ActiveValue::Set(StringList::default()),
            extra_links: ActiveValue::Set(serde_json::json!({})),
            api_token: ActiveValue::Set(api_token),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        })
        .on_conflict(
            OnConflict::column(entity::user::Column::UserId)
                .update_columns([
                    entity::user::Column::Username,
                    entity::user::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        self.find_by_id(user_id).await?.ok_or(DbErr::RecordNotFound(format!(
            "User {} not found after upsert",
            user_id
        )))
    }
}
