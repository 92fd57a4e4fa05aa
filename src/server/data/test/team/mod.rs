use crate::server::{data::team::TeamRepository, model::team::CreateTeamParams};
use chrono::Utc;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_member;
mod set_member_flags;
