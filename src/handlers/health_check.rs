//! # Health Check Handler
//!
//! Liveness endpoint. Never touches the database, so it answers even when
//! every other route is failing.

use axum::http::StatusCode;
use tracing::{debug, instrument};

/// Returns `200 OK` with an empty body.
#[instrument]
pub async fn health_check() -> StatusCode {
    debug!("Health check endpoint accessed");
    StatusCode::OK
}
