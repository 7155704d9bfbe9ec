//! # Raw Errors
//!
//! [`RawError`] is the loosely shaped value a host hands to the pipeline:
//! whatever the runtime, the data-access layer, the validator or the
//! authentication layer produced. Every field is optional. Concrete library
//! errors are turned into a `RawError` by the conversions in
//! [`convert`](super::convert); upstream JSON error bodies can be
//! deserialized straight into one.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Marker telling classifiers which library family produced an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Origin {
    #[default]
    Unknown,
    /// Data store could not be reached or refused the session.
    Connection,
    /// Data store rejected a statement it was asked to execute.
    Query,
    /// Input failed schema validation.
    Validation {
        #[serde(default)]
        details: Vec<ValidationDetail>,
        /// Message of the wrapped validator error, if any.
        #[serde(default)]
        message: Option<String>,
    },
    /// Authentication layer rejected the request's credentials.
    Unauthorized,
}

/// One failed rule reported by a validator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationDetail {
    pub message: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl ValidationDetail {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
            code: None,
        }
    }
}

/// The fixed set of recognized data-store connectivity failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionFailure {
    Refused,
    AccessDenied,
    AcquireTimeout,
    TimedOut,
    HostNotFound,
    HostUnreachable,
    InvalidParameters,
}

impl ConnectionFailure {
    pub const ALL: [ConnectionFailure; 7] = [
        Self::Refused,
        Self::AccessDenied,
        Self::AcquireTimeout,
        Self::TimedOut,
        Self::HostNotFound,
        Self::HostUnreachable,
        Self::InvalidParameters,
    ];

    /// Family name carried in [`RawError::name`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Refused => "ConnectionRefusedError",
            Self::AccessDenied => "AccessDeniedError",
            Self::AcquireTimeout => "ConnectionAcquireTimeoutError",
            Self::TimedOut => "ConnectionTimedOutError",
            Self::HostNotFound => "HostNotFoundError",
            Self::HostUnreachable => "HostNotReachableError",
            Self::InvalidParameters => "InvalidConnectionError",
        }
    }

    /// Human-readable reason appended to the connection message.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Refused => "connection refused.",
            Self::AccessDenied => "insufficient privileges.",
            Self::AcquireTimeout => "connection not acquired due to timeout.",
            Self::TimedOut => "connection timed out.",
            Self::HostNotFound => "hostname not found.",
            Self::HostUnreachable => "hostname not reachable.",
            Self::InvalidParameters => "invalid connection parameters.",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|failure| failure.name() == name)
    }
}

/// Nested response carried by errors from HTTP clients.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResponseInfo {
    pub status: Option<Value>,
}

/// An arbitrary error value, read-only input to the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawError {
    pub name: Option<String>,
    pub message: Option<String>,
    /// Platform error code such as `EADDRINUSE`.
    pub code: Option<String>,
    /// Whatever the producer put in its status field; may be garbage.
    pub status: Option<Value>,
    pub response: Option<ResponseInfo>,
    pub stack: Option<String>,
    pub port: Option<u16>,
    pub address: Option<String>,
    /// Statement text of a failed query.
    pub sql: Option<String>,
    /// Explicit override of whether the message may reach clients.
    pub expose: Option<bool>,
    pub origin: Origin,
}

impl RawError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Authentication failure, with or without a message of its own.
    pub fn unauthorized(message: Option<String>) -> Self {
        Self {
            name: Some("UnauthorizedError".into()),
            message,
            origin: Origin::Unauthorized,
            ..Self::default()
        }
    }

    /// Validation failure carrying structured details.
    pub fn validation(details: Vec<ValidationDetail>) -> Self {
        Self {
            name: Some("ValidationError".into()),
            message: Some("Validation failed".into()),
            origin: Origin::Validation {
                details,
                message: None,
            },
            ..Self::default()
        }
    }

    /// Connectivity failure of a recognized family.
    pub fn connection(failure: ConnectionFailure, message: impl Into<String>) -> Self {
        Self {
            name: Some(failure.name().into()),
            message: Some(message.into()),
            origin: Origin::Connection,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Accepts numbers and strings alike; resolution happens at classification time.
    pub fn with_status(mut self, status: impl Into<Value>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_response_status(mut self, status: impl Into<Value>) -> Self {
        self.response = Some(ResponseInfo {
            status: Some(status.into()),
        });
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_bind_target(mut self, port: u16, address: impl Into<String>) -> Self {
        self.port = Some(port);
        self.address = Some(address.into());
        self
    }

    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn exposed(mut self, expose: bool) -> Self {
        self.expose = Some(expose);
        self
    }

    /// Own message, if present and non-empty.
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }
}

/// Mirrors how a generic error stringifies: `Name: message`, either half alone,
/// or plain `Error` when the value carries neither.
impl fmt::Display for RawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().filter(|name| !name.is_empty());
        match (name, self.message_text()) {
            (Some(name), Some(message)) => write!(f, "{name}: {message}"),
            (Some(name), None) => f.write_str(name),
            (None, Some(message)) => f.write_str(message),
            (None, None) => f.write_str("Error"),
        }
    }
}

impl std::error::Error for RawError {}
