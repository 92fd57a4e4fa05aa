use crate::server::{
    data::session::SessionRepository,
    model::session::{CreateSessionParams, SESSION_TYPE_API},
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
