use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        invite::{InviteCountersDto, InviteLeaderboardDto},
    },
    server::{error::AppError, service::invite::InviteService, state::AppState},
};

/// Tag for grouping invite endpoints in OpenAPI documentation
pub static INVITE_TAG: &str = "invite";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Zero-based page index (default: 0)
    #[serde(default)]
    pub page: u64,
    /// Entries per page (default: 10)
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    10
}

/// Get the invite leaderboard of a guild.
///
/// Ranks every member with invite activity by total invites, highest first. Members
/// whose counters are all zero are left out.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `guild_id` - Discord guild ID to rank
/// - `params` - Pagination parameters (page and entries)
///
/// # Returns
/// - `200 OK` - One page of the leaderboard
/// - `400 Bad Request` - `entries` is zero
/// - `503 Service Unavailable` - The database did not answer in time
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/invites",
    tag = INVITE_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Successfully retrieved the leaderboard", body = InviteLeaderboardDto),
        (status = 400, description = "Invalid pagination parameters", body = ErrorDto),
        (status = 503, description = "Database timed out", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_invite_leaderboard(
    State(state): State<AppState>,
    Path(guild_id): Path<u64>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let service = InviteService::new(&state.db, state.settings);

    let leaderboard = service
        .leaderboard(guild_id, params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(leaderboard.into_dto())))
}

/// Get the invite counters of one member.
///
/// A member who never invited anyone has all counters at zero.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `guild_id` - Discord guild ID
/// - `user_id` - Discord user ID of the inviter
///
/// # Returns
/// - `200 OK` - The member's counters
/// - `503 Service Unavailable` - The database did not answer in time
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/invites/{user_id}",
    tag = INVITE_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("user_id" = u64, Path, description = "Discord user ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved invite counters", body = InviteCountersDto),
        (status = 503, description = "Database timed out", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_member_invites(
    State(state): State<AppState>,
    Path((guild_id, user_id)): Path<(u64, u64)>,
) -> Result<impl IntoResponse, AppError> {
    let service = InviteService::new(&state.db, state.settings);

    let counters = service.get_counters(guild_id, user_id).await?;

    Ok((StatusCode::OK, Json(counters.into_dto(user_id))))
}
