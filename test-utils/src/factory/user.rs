//! User factory for creating test user entities.

use crate::factory::helpers::{next_id, unique_token};
use chrono::Utc;
use entity::types::StringList;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .user_id("123456789")
///     .banned(true)
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: String,
    username: String,
    banned: bool,
    vote_banned: bool,
    api_token: String,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - user_id: auto-incremented numeric string
    /// - username: `"User {id}"`
    /// - banned and vote_banned: `false`
    /// - api_token: unique token
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            user_id: id.to_string(),
            username: format!("User {}", id),
            banned: false,
            vote_banned: false,
            api_token: unique_token("user"),
        }
    }

    /// Sets the Discord ID for the user.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets whether the user is banned from the list.
    pub fn banned(mut self, banned: bool) -> Self {
        self.banned = banned;
        self
    }

    /// Sets whether the user is banned from voting.
    pub fn vote_banned(mut self, vote_banned: bool) -> Self {
        self.vote_banned = vote_banned;
        self
    }

    /// Sets the user's API token.
    pub fn api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = api_token.into();
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            username: ActiveValue::Set(self.username),
            banned: ActiveValue::Set(self.banned),
            vote_banned: ActiveValue::Set(self.vote_banned),
            experiments: ActiveValue::Set(StringList::default()),
            extra_links: ActiveValue::Set(serde_json::json!({})),
            api_token: ActiveValue::Set(self.api_token),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}
