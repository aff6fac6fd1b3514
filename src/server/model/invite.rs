use std::fmt;

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::invite::{InviteCountersDto, InviteLeaderboardDto, InviteLeaderboardEntryDto},
    server::util::parse::parse_snowflake,
};

/// Stored inviter value for joins through the guild's vanity URL.
pub const VANITY_INVITER: &str = "VANITY";

/// Who a join is credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inviter {
    /// A guild member who owns the invite that was used.
    Member(u64),
    /// The guild's vanity URL. Never owns a counters row.
    Vanity,
}

impl Inviter {
    /// Decodes the stored `inviter_id` column.
    ///
    /// # Returns
    /// - `Ok(Inviter::Vanity)` - Column holds the `VANITY` sentinel
    /// - `Ok(Inviter::Member(id))` - Column holds a snowflake
    /// - `Err(DbErr::Custom)` - Column holds anything else
    pub fn from_db(value: &str) -> Result<Self, DbErr> {
        if value == VANITY_INVITER {
            return Ok(Self::Vanity);
        }

        parse_snowflake("inviter_id", value).map(Self::Member)
    }

    pub fn to_db(&self) -> String {
        match self {
            Self::Member(id) => id.to_string(),
            Self::Vanity => VANITY_INVITER.to_string(),
        }
    }

    /// Returns the member ID, or `None` for the vanity URL.
    pub fn member_id(&self) -> Option<u64> {
        match self {
            Self::Member(id) => Some(*id),
            Self::Vanity => None,
        }
    }
}

impl fmt::Display for Inviter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member(id) => write!(f, "{}", id),
            Self::Vanity => f.write_str("vanity URL"),
        }
    }
}

/// Aggregate invite statistics of one inviter in one guild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InviteCounters {
    pub regular: i32,
    pub fake: i32,
    pub bonus: i32,
    pub left: i32,
}

impl InviteCounters {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: &entity::invite_counter::Model) -> Self {
        Self {
            regular: entity.regular,
            fake: entity.fake,
            bonus: entity.bonus,
            left: entity.left_count,
        }
    }

    /// Effective invite count shown to users, `regular + bonus - left` floored at zero.
    ///
    /// Summed in `i64` so extreme bonuses saturate at `i32::MAX` instead of wrapping.
    pub fn total(&self) -> i32 {
        let total = i64::from(self.regular) + i64::from(self.bonus) - i64::from(self.left);

        total.clamp(0, i64::from(i32::MAX)) as i32
    }

    /// True when every counter is zero.
    pub fn is_empty(&self) -> bool {
        self.regular == 0 && self.fake == 0 && self.bonus == 0 && self.left == 0
    }

    pub fn into_dto(self, user_id: u64) -> InviteCountersDto {
        InviteCountersDto {
            user_id: user_id.to_string(),
            regular: self.regular,
            fake: self.fake,
            bonus: self.bonus,
            left: self.left,
            total: self.total(),
        }
    }
}

/// Counters derived from join history for one inviter.
///
/// - `regular` - genuine joins credited to the inviter, including ones that later left
/// - `left` - genuine joins that have since left
/// - `fake` - joins classified as fake
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InviteTally {
    pub regular: i32,
    pub left: i32,
    pub fake: i32,
}

/// Most recent join of a member into a guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRecord {
    pub guild_id: u64,
    pub user_id: u64,
    /// `None` when the join could not be attributed.
    pub inviter: Option<Inviter>,
    pub is_fake: bool,
    pub joined_at: DateTime<Utc>,
    pub has_left: bool,
}

impl JoinRecord {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(JoinRecord)` - Successfully converted record
    /// - `Err(DbErr::Custom)` - A stored snowflake or inviter value is malformed
    pub fn from_entity(entity: entity::join_record::Model) -> Result<Self, DbErr> {
        Ok(Self {
            guild_id: parse_snowflake("guild_id", &entity.guild_id)?,
            user_id: parse_snowflake("user_id", &entity.user_id)?,
            inviter: entity
                .inviter_id
                .as_deref()
                .map(Inviter::from_db)
                .transpose()?,
            is_fake: entity.is_fake,
            joined_at: entity.joined_at,
            has_left: entity.has_left,
        })
    }
}

/// A member join as observed by the gateway, with its detected attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberJoin {
    pub guild_id: u64,
    pub user_id: u64,
    pub inviter: Option<Inviter>,
    pub joined_at: DateTime<Utc>,
    pub account_created_at: DateTime<Utc>,
    pub has_avatar: bool,
}

impl MemberJoin {
    /// True when the member was credited to their own invite.
    pub fn is_self_invite(&self) -> bool {
        self.inviter == Some(Inviter::Member(self.user_id))
    }
}

/// Result of handling a member join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// No inviter could be determined, nothing was written.
    Unattributed,
    Recorded {
        inviter: Inviter,
        is_fake: bool,
        /// The member already had a join record in this guild.
        returning: bool,
    },
}

/// Result of handling a member leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// No join record, or the join was never attributed.
    NoAttribution,
    /// The join was fake and never credited, so there is nothing to take back.
    FakeJoin,
    /// Another leave event already counted this departure.
    AlreadyCounted,
    /// The departure was counted against the inviter.
    ///
    /// `counters` is `None` for vanity joins, which have no counters row.
    Counted {
        inviter: Inviter,
        counters: Option<InviteCounters>,
    },
}

/// Rows removed by an administrative reset of one guild.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetSummary {
    pub counters_removed: u64,
    pub records_removed: u64,
}

impl ResetSummary {
    pub fn is_empty(&self) -> bool {
        self.counters_removed == 0 && self.records_removed == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: u64,
    pub user_id: u64,
    pub counters: InviteCounters,
}

/// One page of a guild's invite leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardPage {
    pub entries: Vec<LeaderboardEntry>,
    /// Zero-based page index.
    pub page: u64,
    pub per_page: u64,
    /// Number of ranked members across all pages.
    pub total: u64,
}

impl LeaderboardPage {
    /// Number of pages, at least one so an empty board still renders "page 1 of 1".
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 1;
        }
        self.total.div_ceil(self.per_page).max(1)
    }

    pub fn into_dto(self) -> InviteLeaderboardDto {
        let total_pages = self.total_pages();
        InviteLeaderboardDto {
            entries: self
                .entries
                .into_iter()
                .map(|entry| InviteLeaderboardEntryDto {
                    rank: entry.rank,
                    counters: entry.counters.into_dto(entry.user_id),
                })
                .collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages,
        }
    }
}
