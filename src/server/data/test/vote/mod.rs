use crate::server::data::vote::{VoteRepository, CREDIT_REDEEM_REASON};
use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod count_votes;
mod get_user_vote_times;
mod insert_votes;
mod void_for_redeem;
