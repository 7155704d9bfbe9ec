use axum::http::{Method, Uri};

use crate::models::RawError;

/// Fallback for unmatched routes: `404 NotFound`, `Cannot <METHOD> <path>`.
pub async fn not_found(method: Method, uri: Uri) -> RawError {
    RawError::new(format!("Cannot {method} {}", uri.path())).with_status(404)
}

/// Fallback for a known path hit with the wrong method: `405 MethodNotAllowed`.
pub async fn method_not_allowed(method: Method, uri: Uri) -> RawError {
    RawError::new(format!("Cannot {method} {}", uri.path())).with_status(405)
}
