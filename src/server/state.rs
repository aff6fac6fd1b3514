//! Application state shared across all request handlers.

use sea_orm::DatabaseConnection;

use crate::server::service::invite::InviteSettings;

/// Shared state handed to every controller through Axum's state extraction.
///
/// Cheap to clone: `DatabaseConnection` is a pool handle and the settings are `Copy`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub settings: InviteSettings,
}

impl AppState {
    pub fn new(db: DatabaseConnection, settings: InviteSettings) -> Self {
        Self { db, settings }
    }
}
