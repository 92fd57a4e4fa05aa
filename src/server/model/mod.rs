//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs at the controller boundary.

pub mod auth;
pub mod credit;
pub mod listing;
pub mod notification;
pub mod session;
pub mod team;
pub mod vote;
