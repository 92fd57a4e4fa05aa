use crate::server::data::reminder::ReminderRepository;
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_due;
mod replace;
