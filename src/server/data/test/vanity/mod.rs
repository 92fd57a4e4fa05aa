use crate::server::data::vanity::VanityRepository;
use chrono::Utc;
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod upsert;
