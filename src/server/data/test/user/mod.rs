use crate::server::data::user::UserRepository;
use chrono::Utc;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod find_by_token;
mod upsert_login;
