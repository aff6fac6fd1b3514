use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Invite statistics of one member. Snowflakes are serialised as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InviteCountersDto {
    pub user_id: String,
    pub regular: i32,
    pub fake: i32,
    pub bonus: i32,
    pub left: i32,
    /// `regular + bonus - left`, never below zero.
    pub total: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InviteLeaderboardEntryDto {
    /// One-based rank across the whole leaderboard.
    pub rank: u64,
    #[serde(flatten)]
    pub counters: InviteCountersDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InviteLeaderboardDto {
    pub entries: Vec<InviteLeaderboardEntryDto>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}
