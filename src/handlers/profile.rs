//! # Profile Handler
//!
//! Returns the subject of the caller's access token. Sits behind
//! [`auth_middleware`](crate::middleware::auth_middleware), so every
//! authentication failure reaches the error pipeline before this runs.

use axum::{Json, extract::Extension};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::middleware::AuthUser;

/// Response containing the authenticated subject
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub subject: String,
    pub expires_at: u64,
}

/// Gets the authenticated caller's token subject.
///
/// GET /api/profile
///
/// # Returns
///
/// - `200 OK` with [`ProfileResponse`]
/// - `401 Unauthorized` - Missing or invalid authentication token
#[instrument(skip_all, fields(subject = %user.claims.sub))]
pub async fn get_profile(Extension(user): Extension<AuthUser>) -> Json<ProfileResponse> {
    debug!("Processing profile request");

    Json(ProfileResponse {
        subject: user.claims.sub,
        expires_at: user.claims.exp,
    })
}
