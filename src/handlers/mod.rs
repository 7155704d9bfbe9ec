//! # HTTP Request Handlers
//!
//! Endpoints of the demo host. Each one fails in a way that exercises a
//! different error family.
//!
//! ## Available Handlers
//!
//! - **Health Check** (`health_check`) - Application health monitoring
//! - **Signup** (`signup`) - Schema validation errors
//! - **Profile** (`profile`) - Authentication errors
//! - **Records** (`records`) - Data-store errors
//! - **Not Found** (`not_found`, `method_not_allowed`) - Generic errors carrying their own status

mod health_check;
mod not_found;
mod profile;
mod records;
mod signup;

pub use health_check::*;
pub use not_found::*;
pub use profile::*;
pub use records::*;
pub use signup::*;
