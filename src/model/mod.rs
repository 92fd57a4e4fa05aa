//! Request and response bodies of the HTTP API.
//!
//! These types are the wire contract with browser clients and integrations. Domain models
//! in `server::model` convert into them at the controller boundary.

pub mod api;
pub mod auth;
pub mod credit;
pub mod listing;
pub mod notification;
pub mod session;
pub mod team;
pub mod vote;
