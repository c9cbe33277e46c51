/// Shared application state
use crate::services::AuthService;
use musicapp_storage::Database;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    /// Upper bound on `per_page` for paginated listings
    pub max_per_page: i64,
}

impl AppState {
    pub fn new(db: Arc<Database>, auth_service: Arc<AuthService>, max_per_page: i64) -> Self {
        Self {
            db,
            auth_service,
            max_per_page,
        }
    }
}
