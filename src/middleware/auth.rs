//! # Authentication Middleware
//!
//! This module contains the authentication middleware that validates JWT tokens
//! and provides user context to protected routes. Rejections are returned as
//! authentication errors for the error pipeline to classify and render.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, trace, warn};

use crate::models::{AppState, RawError};
use crate::services::jwt::Claims;

/// Authentication middleware for protecting routes
///
/// # Authentication Flow
///
/// 1. Extracts `Authorization` header with `Bearer <token>` format
/// 2. Validates the JWT token signature and expiration
/// 3. Adds [`AuthUser`] to request extensions for handler access
///
/// # Returns
///
/// - **Success**: Continues to next handler with user context
/// - **Failure**: An authentication [`RawError`], rendered as `401 Unauthorized`
#[instrument(
    skip_all,
    fields(
        method = %req.method(),
        uri = %req.uri()
    )
)]
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, RawError> {
    trace!("Processing authentication middleware");

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let Some(auth_header) = auth_header else {
        warn!("Missing Authorization header");
        return Err(RawError::unauthorized(Some(
            "No authorization token was found".into(),
        )));
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        warn!("Invalid Authorization header format");
        return Err(RawError::unauthorized(Some(
            "Format is Authorization: Bearer [token]".into(),
        )));
    };

    let claims = state.jwt_service.validate_access_token(token).map_err(|e| {
        warn!(error = %e, "Token validation failed");
        RawError::from(e)
    })?;

    debug!(subject = %claims.sub, "Authentication successful");
    req.extensions_mut().insert(AuthUser { claims });

    Ok(next.run(req).await)
}

/// Authenticated user information available to handlers
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// JWT claims of the validated access token
    pub claims: Claims,
}
