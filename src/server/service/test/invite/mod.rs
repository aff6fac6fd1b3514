use chrono::{TimeDelta, Utc};
use crate::server::{
    data::{invite_counter::InviteCounterRepository, join_record::JoinRecordRepository},
    error::AppError,
    model::invite::{InviteCounters, Inviter, JoinOutcome, LeaveOutcome, MemberJoin},
    service::invite::{InviteService, InviteSettings},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod handle_join;
mod resync;
mod sync_user_invites;

/// A join of a ten day old account with an avatar.
fn genuine_join(guild_id: u64, user_id: u64, inviter: Option<Inviter>) -> MemberJoin {
    let now = Utc::now();
    MemberJoin {
        guild_id,
        user_id,
        inviter,
        joined_at: now,
        account_created_at: now - TimeDelta::days(10),
        has_avatar: true,
    }
}

/// A join of an hour old account without an avatar.
fn suspicious_join(guild_id: u64, user_id: u64, inviter: Option<Inviter>) -> MemberJoin {
    let now = Utc::now();
    MemberJoin {
        guild_id,
        user_id,
        inviter,
        joined_at: now,
        account_created_at: now - TimeDelta::hours(1),
        has_avatar: false,
    }
}
