//! # Faultline - HTTP Error Normalization
//!
//! Turns heterogeneous failures (listener bind errors, database connectivity
//! and execution errors, validation errors, token errors, anything else) into
//! one normalized HTTP error, logs it, and renders it as plain text or JSON
//! according to the request's `Accept` header.
//!
//! ## Modules
//!
//! - [`models`] - Raw and normalized error shapes, format negotiation, request facade
//! - [`services`] - Classifiers, logger, renderer and the pipeline chaining them
//! - [`middleware`] - axum glue running the pipeline on failed responses
//! - [`handlers`] - Endpoints of the demo host
//! - [`config`] - Environment-driven configuration
//! - [`utils`] - Constants and tracing setup

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use crate::config::{Config, HostSettings};
pub use crate::error::{SetupError, SetupResult};
pub use crate::models::{HttpError, RawError, RequestInfo, ResponseFormat};
pub use crate::services::logger::{ErrorLogger, LogSink, TracingSink};
pub use crate::services::pipeline::{ErrorValue, Pipeline};

use crate::handlers::{
    get_profile, get_record, health_check, method_not_allowed, not_found, signup,
};
use crate::middleware::{auth_middleware, error_middleware};
use crate::models::AppState;
use crate::services::jwt::JwtService;
use crate::utils::constant::DB_ACQUIRE_TIMEOUT;

/// Creates the demo host router, logging errors through [`TracingSink`].
///
/// This is a convenience function that calls [`app_with_sink`].
#[inline]
pub fn app(config: &Config, settings: &HostSettings) -> SetupResult<Router> {
    app_with_sink(config, settings, Arc::new(TracingSink))
}

/// Creates the demo host router with the error pipeline installed.
///
/// # Arguments
///
/// * `config` - Error pipeline configuration, read once at startup
/// * `settings` - Demo host settings (JWT secret, database URL)
/// * `sink` - Destination for logged errors
///
/// # Errors
///
/// [`SetupError::Database`] when the database URL cannot be parsed. The pool
/// itself connects lazily, so an unreachable database only shows up as
/// request-time errors.
pub fn app_with_sink(
    config: &Config,
    settings: &HostSettings,
    sink: Arc<dyn LogSink>,
) -> SetupResult<Router> {
    let pipeline = Arc::new(Pipeline::builder(config).sink(sink).build());

    let db_pool = PgPoolOptions::new()
        .acquire_timeout(DB_ACQUIRE_TIMEOUT)
        .connect_lazy(&settings.database_url)?;
    let jwt_service = JwtService::from_secret(&settings.jwt_secret);
    let state = Arc::new(AppState::new(db_pool, jwt_service));

    info!(production = config.production, "Building router");

    let protected_routes = Router::new()
        .route("/api/profile", get(get_profile))
        .route_layer(from_fn_with_state(Arc::clone(&state), auth_middleware));

    let public_routes = Router::new()
        .route("/health-check", get(health_check))
        .route("/api/signup", post(signup))
        .route("/api/records/{id}", get(get_record));

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(from_fn_with_state(pipeline, error_middleware)))
}
