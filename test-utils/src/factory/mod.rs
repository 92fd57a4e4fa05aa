//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::user::create_user(&db).await?;
//!     let bot = factory::bot::BotFactory::new(&db)
//!         .owner(&user.user_id)
//!         .premium(true)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users
//! - `team` - Teams and team members
//! - `bot` - Bots
//! - `server` - Servers
//! - `session` - API and login sessions
//! - `vote` - Entity votes
//! - `vote_credit_tier` - Vote credit slabs
//! - `notification` - Web push subscriptions
//! - `reminder` - Vote reminders
//! - `staff` - Staff positions and members
//! - `webhook` - Vote webhooks
//! - `helpers` - Unique id generation

pub mod bot;
pub mod helpers;
pub mod notification;
pub mod reminder;
pub mod server;
pub mod session;
pub mod staff;
pub mod team;
pub mod user;
pub mod vote;
pub mod vote_credit_tier;
pub mod webhook;

pub use bot::create_bot;
pub use notification::create_subscription;
pub use reminder::create_reminder;
pub use server::create_server;
pub use session::create_session;
pub use team::{create_team, create_team_member};
pub use user::create_user;
pub use vote::create_vote;
