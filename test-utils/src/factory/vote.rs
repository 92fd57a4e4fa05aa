//! Vote factory for creating entity votes.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test votes.
pub struct VoteFactory<'a> {
    db: &'a DatabaseConnection,
    target_type: String,
    target_id: String,
    author: String,
    upvote: bool,
    void: bool,
    vote_num: i32,
    created_at: DateTime<Utc>,
}

impl<'a> VoteFactory<'a> {
    /// Creates a non-void upvote cast now.
    pub fn new(db: &'a DatabaseConnection, target_type: &str, target_id: &str, author: &str) -> Self {
        Self {
            db,
            target_type: target_type.to_string(),
            target_id: target_id.to_string(),
            author: author.to_string(),
            upvote: true,
            void: false,
            vote_num: 0,
            created_at: Utc::now(),
        }
    }

    /// Sets whether the vote is an upvote.
    pub fn upvote(mut self, upvote: bool) -> Self {
        self.upvote = upvote;
        self
    }

    /// Sets whether the vote has been voided.
    pub fn void(mut self, void: bool) -> Self {
        self.void = void;
        self
    }

    /// Sets the position of the vote within its batch.
    pub fn vote_num(mut self, vote_num: i32) -> Self {
        self.vote_num = vote_num;
        self
    }

    /// Sets when the vote was cast.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the vote into the database.
    pub async fn build(self) -> Result<entity::entity_vote::Model, DbErr> {
        entity::entity_vote::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            target_type: ActiveValue::Set(self.target_type),
            target_id: ActiveValue::Set(self.target_id),
            author: ActiveValue::Set(self.author),
            upvote: ActiveValue::Set(self.upvote),
            void: ActiveValue::Set(self.void),
            void_reason: ActiveValue::Set(self.void.then(|| "Test void".to_string())),
            voided_at: ActiveValue::Set(self.void.then_some(self.created_at)),
            credit_redeem: ActiveValue::Set(None),
            vote_num: ActiveValue::Set(self.vote_num),
            created_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a non-void upvote cast now.
pub async fn create_vote(
    db: &DatabaseConnection,
    target_type: &str,
    target_id: &str,
    author: &str,
) -> Result<entity::entity_vote::Model, DbErr> {
    VoteFactory::new(db, target_type, target_id, author).build().await
}

/// Creates `count` non-void upvotes from distinct synthetic authors.
///
/// # Returns
/// - `Ok(())` - All votes inserted
/// - `Err(DbErr)` - Database error during insert
pub async fn create_votes(
    db: &DatabaseConnection,
    target_type: &str,
    target_id: &str,
    count: usize,
) -> Result<(), DbErr> {
    for i in 0..count {
        create_vote(db, target_type, target_id, &format!("voter_{i}")).await?;
    }
    Ok(())
}
