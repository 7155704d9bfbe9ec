pub mod auth;
pub mod errors;

pub use auth::{AuthUser, auth_middleware};
pub use errors::error_middleware;
