use sqlx::PgPool;
use tracing::info;

use crate::services::jwt::JwtService;

/// Demo host state shared across requests. Needs to be thread-safe.
pub struct AppState {
    /// The PostgreSQL connection pool. Connects lazily.
    pub db_pool: PgPool,
    /// JWT service for access-token validation.
    pub jwt_service: JwtService,
}

impl AppState {
    /// Creates a new application state with the provided services.
    ///
    /// # Arguments
    ///
    /// * `db_pool` - PostgreSQL database connection pool
    /// * `jwt_service` - Service for JWT token operations
    pub fn new(db_pool: PgPool, jwt_service: JwtService) -> Self {
        info!("Initializing application state");
        Self {
            db_pool,
            jwt_service,
        }
    }
}
