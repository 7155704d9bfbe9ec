//! # Error Pipeline Middleware
//!
//! Handlers (and inner middleware) return `Result<_, RawError>` or
//! `Result<_, HttpError>`. Their `IntoResponse` impls only park the error in
//! the response extensions behind a bare `500`; [`error_middleware`] picks it
//! up on the way out and replaces the response with the pipeline's, built
//! against the live request's method, path, peer and `Accept` header.
//!
//! Without the middleware installed a parked error stays a bodiless `500`.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::trace;

use crate::models::{HttpError, RawError, RequestInfo};
use crate::services::pipeline::{ErrorValue, Pipeline};

impl IntoResponse for RawError {
    fn into_response(self) -> Response {
        park(ErrorValue::Raw(self))
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        park(ErrorValue::Normalized(self))
    }
}

fn park(error: ErrorValue) -> Response {
    let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
    response.extensions_mut().insert(error);
    response
}

/// Runs parked errors through the pipeline.
///
/// # Usage
///
/// ```rust,ignore
/// Router::new()
///     .route("/", get(handler))
///     .layer(middleware::from_fn_with_state(pipeline, error_middleware))
/// ```
pub async fn error_middleware(
    State(pipeline): State<Arc<Pipeline>>,
    req: Request,
    next: Next,
) -> Response {
    let request = RequestInfo::from_request(&req);
    let mut response = next.run(req).await;

    match response.extensions_mut().remove::<ErrorValue>() {
        Some(error) => {
            trace!("Handling parked error");
            pipeline.run(error, &request)
        }
        None => response,
    }
}
