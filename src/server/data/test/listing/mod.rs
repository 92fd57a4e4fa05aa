use crate::server::{data::listing::ListingRepository, model::auth::TargetType};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod demote_premium;
mod find;
mod get_servers_paginated;
mod set_votes;
