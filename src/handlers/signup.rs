//! # Signup Handler
//!
//! Accepts a signup payload and validates it. Malformed JSON keeps the
//! extractor's own 4xx status; rule violations become validation errors.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use validator::Validate;

use crate::models::RawError;

/// Request payload for creating an account
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required, length(min = 8))]
    pub password: Option<String>,
}

/// Response confirming a signup
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub email: String,
}

/// Validates a signup request.
///
/// POST /api/signup
///
/// # Returns
///
/// - `201 Created` - Payload accepted
/// - `400 Bad Request` - A field failed validation; the message names the first one
/// - `4xx` - The body was not acceptable JSON
#[instrument(skip_all)]
pub async fn signup(
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), RawError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejected signup body");
        RawError::new(rejection.body_text()).with_status(rejection.status().as_u16())
    })?;

    payload.validate()?;

    let email = payload.email.unwrap_or_default();
    debug!(%email, "Signup payload accepted");
    Ok((StatusCode::CREATED, Json(SignupResponse { email })))
}
