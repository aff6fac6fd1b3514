use chrono::{DateTime, TimeDelta, Utc};

use crate::server::model::invite::MemberJoin;

const DEFAULT_MIN_ACCOUNT_AGE_HOURS: i64 = 168;

/// Heuristics deciding whether a join should be treated as fake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FraudPolicy {
    /// Accounts younger than this are suspicious.
    pub min_account_age: TimeDelta,
    /// Accounts without a custom avatar are suspicious when set.
    pub require_avatar: bool,
}

impl FraudPolicy {
    /// Builds a policy from an account age threshold in hours.
    ///
    /// Negative thresholds are treated as zero.
    pub fn new(min_account_age_hours: i64, require_avatar: bool) -> Self {
        Self {
            min_account_age: TimeDelta::try_hours(min_account_age_hours.max(0))
                .unwrap_or(TimeDelta::MAX),
            require_avatar,
        }
    }

    /// Judges an account by its age at `now` and whether it has an avatar.
    pub fn is_suspicious(
        &self,
        created_at: DateTime<Utc>,
        has_avatar: bool,
        now: DateTime<Utc>,
    ) -> bool {
        let too_young = now.signed_duration_since(created_at) < self.min_account_age;
        let missing_avatar = self.require_avatar && !has_avatar;

        too_young || missing_avatar
    }

    /// Decides whether a join is fake.
    ///
    /// A member credited to their own invite is always fake, whatever the account
    /// looks like. Otherwise the account is judged at the time it joined.
    pub fn classify_join(&self, join: &MemberJoin) -> bool {
        join.is_self_invite()
            || self.is_suspicious(join.account_created_at, join.has_avatar, join.joined_at)
    }
}

impl Default for FraudPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ACCOUNT_AGE_HOURS, true)
    }
}
