//! Business logic between the controllers and the repositories.
//!
//! Services take borrowed handles from `AppState` and are constructed per request or per
//! job tick. Outbound collaborators (Discord, Web-Push, Redis) sit behind traits so the
//! services can be tested against in-memory fakes.

pub mod auth;
pub mod code_cache;
pub mod credit;
pub mod discord;
pub mod entity_info;
pub mod entity_perms;
pub mod listing;
pub mod notification;
pub mod premium;
pub mod push;
pub mod reminder;
pub mod session;
pub mod team;
pub mod vanity;
pub mod vote;
pub mod webhook;
