use crate::server::data::credit::CreditRepository;
use chrono::Utc;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_tiers;
mod insert_redeem_log;
