use chrono::{TimeZone, Utc};
use crate::server::{
    data::join_record::JoinRecordRepository,
    model::invite::{InviteTally, Inviter, VANITY_INVITER},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod claim_leave;
mod delete_by_guild;
mod exists;
mod find;
mod get_guild_ids;
