//! # Application Constants
//!
//! This module defines the fixed labels and messages of the error pipeline
//! together with the few timeouts the demo host relies on.

use std::time::Duration;

/// Name shown to clients in place of a redacted server error's real name.
pub const REDACTED_NAME: &str = "InternalServerError";

/// Message shown to clients in place of a redacted server error's real message.
pub const REDACTED_MESSAGE: &str = "Internal server error";

/// Message used when an authentication error carries no message of its own.
pub const DEFAULT_AUTH_MESSAGE: &str = "Invalid token";

/// Separator placed between a connection error's family name and its reason.
pub const CONNECTION_PREFIX: &str = "Failed to connect to database: ";

/// Default listen address for the demo host.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8090";

/// Expiration time for access tokens issued by the demo host.
pub const ACCESS_TOKEN_EXPIRY: Duration = Duration::from_secs(15 * 60);

/// How long the demo host waits for a pooled database connection.
///
/// Kept short so an unreachable database surfaces as a connectivity error
/// instead of hanging the request.
pub const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(2);
