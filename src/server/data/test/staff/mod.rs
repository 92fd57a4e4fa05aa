use crate::server::data::staff::StaffRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_member_permissions;
