//! # Error Data Model
//!
//! - [`RawError`] - loosely shaped input, read-only
//! - [`HttpError`] - normalized output of classification
//! - [`ResponseFormat`] - negotiated text or JSON representation
//! - [`RequestInfo`] - read-only request facade
//! - [`AppState`] - shared state of the demo host

mod convert;
mod format;
mod http_error;
mod raw;
mod request;
mod state;

pub use format::ResponseFormat;
pub use http_error::{HttpError, explicit_status, parse_status, resolve_status, status_name};
pub use raw::{ConnectionFailure, Origin, RawError, ResponseInfo, ValidationDetail};
pub use request::RequestInfo;
pub use state::AppState;
