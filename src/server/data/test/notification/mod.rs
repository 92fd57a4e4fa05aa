use crate::server::{
    data::notification::SubscriptionRepository,
    model::notification::CreateSubscriptionParams,
};
use chrono::Utc;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete_for_user;
mod replace;
