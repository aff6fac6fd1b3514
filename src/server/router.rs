use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::invite::{self, INVITE_TAG},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Supreme Bot API", description = "Read-only invite statistics"),
    tags((name = INVITE_TAG, description = "Invite counters and leaderboards"))
)]
pub struct ApiDoc;

/// Builds the API routes and serves their OpenAPI document at `/api/docs`.
pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(invite::get_invite_leaderboard))
        .routes(routes!(invite::get_member_invites))
        .split_for_parts();

    router.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
