//! # Library Error Conversions
//!
//! Turns the concrete errors a Rust host actually encounters into
//! [`RawError`] values carrying the markers classifiers look for:
//!
//! - [`std::io::Error`], with platform codes only for listener bind failures
//! - [`sqlx::Error`] from the data store (connectivity or execution)
//! - [`validator::ValidationErrors`] from schema validation
//! - [`jsonwebtoken::errors::Error`] from token verification
//!
//! The source chain of each error is kept as its diagnostic trace.

use std::error::Error as StdError;
use std::io;
use std::net::SocketAddr;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use validator::{ValidationError, ValidationErrors};

use super::raw::{ConnectionFailure, Origin, RawError, ValidationDetail};

/// SQLSTATE raised when a role lacks a privilege.
const INSUFFICIENT_PRIVILEGE: &str = "42501";

impl From<io::Error> for RawError {
    fn from(err: io::Error) -> Self {
        RawError {
            message: Some(err.to_string()),
            stack: source_chain(&err),
            ..RawError::default()
        }
    }
}

impl RawError {
    /// A failed attempt to bind or listen on `addr`.
    ///
    /// Only here does an I/O error kind become a platform code; a permission
    /// error from opening a file is not a listener failure.
    pub fn bind_failure(err: io::Error, addr: SocketAddr) -> Self {
        let code = bind_code(err.kind());
        let raw = RawError::from(err).with_bind_target(addr.port(), addr.ip().to_string());
        match code {
            Some(code) => raw.with_code(code),
            None => raw,
        }
    }

    /// A data-store error raised while running `sql`.
    ///
    /// The statement text is only attached when the failure is an execution
    /// error; connectivity failures never reached the statement.
    pub fn from_query(err: sqlx::Error, sql: &str) -> Self {
        let raw = RawError::from(err);
        if raw.origin == Origin::Query {
            raw.with_sql(sql)
        } else {
            raw
        }
    }
}

impl From<sqlx::Error> for RawError {
    fn from(err: sqlx::Error) -> Self {
        let stack = source_chain(&err);
        let message = err.to_string();

        let failure = match &err {
            sqlx::Error::PoolTimedOut => Some(ConnectionFailure::AcquireTimeout),
            sqlx::Error::Configuration(_) => Some(ConnectionFailure::InvalidParameters),
            sqlx::Error::Io(io) => io_connection_failure(io),
            sqlx::Error::Database(db) if is_access_denied(db.code().as_deref()) => {
                Some(ConnectionFailure::AccessDenied)
            }
            _ => None,
        };

        let raw = match (&err, failure) {
            (_, Some(failure)) => RawError::connection(failure, message),
            (sqlx::Error::Database(db), None) => RawError {
                name: Some("DatabaseError".into()),
                message: Some(db.message().to_owned()),
                code: db.code().map(|code| code.into_owned()),
                origin: Origin::Query,
                ..RawError::default()
            },
            (
                sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::Protocol(_)
                | sqlx::Error::PoolClosed
                | sqlx::Error::WorkerCrashed,
                None,
            ) => RawError::new(message)
                .with_name("ConnectionError")
                .with_origin(Origin::Connection),
            _ => RawError::new(message),
        };

        RawError { stack, ..raw }
    }
}

fn bind_code(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::AddrInUse => Some("EADDRINUSE"),
        io::ErrorKind::PermissionDenied => Some("EACCES"),
        io::ErrorKind::AddrNotAvailable => Some("EADDRNOTAVAIL"),
        _ => None,
    }
}

fn io_connection_failure(err: &io::Error) -> Option<ConnectionFailure> {
    match err.kind() {
        io::ErrorKind::ConnectionRefused => Some(ConnectionFailure::Refused),
        io::ErrorKind::TimedOut => Some(ConnectionFailure::TimedOut),
        io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable => {
            Some(ConnectionFailure::HostUnreachable)
        }
        _ if err.to_string().contains("failed to lookup address") => {
            Some(ConnectionFailure::HostNotFound)
        }
        _ => None,
    }
}

// class 28 is "invalid authorization specification"
fn is_access_denied(code: Option<&str>) -> bool {
    code.is_some_and(|code| code.starts_with("28") || code == INSUFFICIENT_PRIVILEGE)
}

impl From<ValidationErrors> for RawError {
    fn from(err: ValidationErrors) -> Self {
        let mut fields: Vec<(String, Vec<ValidationError>)> = err
            .field_errors()
            .into_iter()
            .map(|(field, errors)| (field.to_string(), errors.clone()))
            .collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));

        let details = fields
            .into_iter()
            .flat_map(|(field, errors)| {
                errors
                    .into_iter()
                    .map(move |error| validation_detail(&field, &error))
            })
            .collect();

        RawError {
            name: Some("ValidationError".into()),
            message: Some("Validation failed".into()),
            origin: Origin::Validation {
                details,
                message: Some(err.to_string()).filter(|message| !message.is_empty()),
            },
            ..RawError::default()
        }
    }
}

fn validation_detail(field: &str, error: &ValidationError) -> ValidationDetail {
    let message = match &error.message {
        Some(message) => message.to_string(),
        None => match error.code.as_ref() {
            "required" => format!("\"{field}\" is required"),
            "email" => format!("\"{field}\" must be a valid email"),
            "length" => format!("\"{field}\" has an invalid length"),
            "range" => format!("\"{field}\" is out of range"),
            code => format!("\"{field}\" failed {code} validation"),
        },
    };

    ValidationDetail {
        message,
        field: Some(field.to_owned()),
        code: Some(error.code.to_string()),
    }
}

impl From<jsonwebtoken::errors::Error> for RawError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        let message = match err.kind() {
            JwtErrorKind::InvalidToken => None,
            JwtErrorKind::ExpiredSignature => Some("jwt expired".to_owned()),
            JwtErrorKind::ImmatureSignature => Some("jwt not active".to_owned()),
            JwtErrorKind::InvalidSignature => Some("invalid signature".to_owned()),
            JwtErrorKind::InvalidAlgorithm => Some("invalid algorithm".to_owned()),
            _ => Some(err.to_string()),
        };

        RawError {
            stack: source_chain(&err),
            ..RawError::unauthorized(message)
        }
    }
}

fn source_chain(err: &dyn StdError) -> Option<String> {
    let mut lines = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {cause}"));
        source = cause.source();
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
