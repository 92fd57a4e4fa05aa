use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Bot};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Bot)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys should be added after their referenced
    /// tables.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the user and team tables used by every permission lookup.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_principal_tables(self) -> Self {
        self.with_table(User)
            .with_table(Team)
            .with_table(TeamMember)
    }

    /// Adds every listing table: users, teams, bots, servers and packs.
    ///
    /// Use this when testing entity info lookups or authentication against entity tokens.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_listing_tables(self) -> Self {
        self.with_principal_tables()
            .with_table(Bot)
            .with_table(Server)
            .with_table(Pack)
    }

    /// Adds the listing tables plus everything voting touches.
    ///
    /// This convenience method adds, after the listing tables:
    /// - EntityVote
    /// - VoteCreditTier
    /// - EntityVoteRedeemLog
    /// - Webhook
    /// - WebhookLog
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_vote_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_vote_tables(self) -> Self {
        self.with_listing_tables()
            .with_table(EntityVote)
            .with_table(VoteCreditTier)
            .with_table(EntityVoteRedeemLog)
            .with_table(Webhook)
            .with_table(WebhookLog)
    }

    /// Adds the web push subscription and reminder tables.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_notification_tables(self) -> Self {
        self.with_table(UserNotification).with_table(UserReminder)
    }

    /// Adds the staff position and staff member tables.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_staff_tables(self) -> Self {
        self.with_table(StaffPosition).with_table(StaffMember)
    }

    /// Adds every table in the schema.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_all_tables(self) -> Self {
        self.with_vote_tables()
            .with_notification_tables()
            .with_staff_tables()
            .with_table(ApiSession)
            .with_table(Vanity)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}
