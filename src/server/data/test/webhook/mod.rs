use crate::server::data::webhook::{WebhookAttempt, WebhookRepository};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DbErr};
use test_utils::{builder::TestBuilder, factory};

mod get_active;
