//! Database repository layer for all domain entities.
//!
//! Repositories use SeaORM entity models internally and return domain models to keep the
//! data layer separate from business logic. Every repository is generic over
//! `ConnectionTrait` so the same queries run against the pool or inside a transaction.

pub mod credit;
pub mod listing;
pub mod notification;
pub mod reminder;
pub mod session;
pub mod staff;
pub mod team;
pub mod user;
pub mod vanity;
pub mod vote;
pub mod webhook;

#[cfg(test)]
mod test;
