//! SeaORM entity models for the listing database.

pub mod prelude;
pub mod types;

pub mod api_session;
pub mod bot;
pub mod entity_vote;
pub mod entity_vote_redeem_log;
pub mod pack;
pub mod server;
pub mod staff_member;
pub mod staff_position;
pub mod team;
pub mod team_member;
pub mod user;
pub mod user_notification;
pub mod user_reminder;
pub mod vanity;
pub mod vote_credit_tier;
pub mod webhook;
pub mod webhook_log;
