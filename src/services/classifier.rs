//! # Error Classifiers
//!
//! Each recognized error family has a predicate ("is this mine?") and a
//! normalization. [`ClassifierRegistry`] evaluates families top to bottom
//! and the first match wins; an error nobody recognizes is passed through
//! untouched so it still reaches the renderer.
//!
//! The `classify_*` functions are the same normalizations without the
//! predicate, for callers that already know what they are holding (a failed
//! `bind`, a failed initial pool connect).

use std::str::FromStr;

use axum::http::StatusCode;

use crate::error::SetupError;
use crate::models::{ConnectionFailure, HttpError, Origin, RawError};
use crate::utils::constant::{CONNECTION_PREFIX, DEFAULT_AUTH_MESSAGE};

/// The closed set of recognized error families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorFamily {
    /// Server failed to bind or listen.
    Transport,
    /// Data store unreachable or refused the session.
    Connection,
    /// Data store failed to execute a statement.
    Query,
    /// Input failed schema validation.
    Validation,
    /// Credentials rejected.
    Unauthorized,
}

impl ErrorFamily {
    /// Canonical evaluation order.
    pub const ALL: [ErrorFamily; 5] = [
        Self::Transport,
        Self::Connection,
        Self::Query,
        Self::Validation,
        Self::Unauthorized,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Connection => "connection",
            Self::Query => "query",
            Self::Validation => "validation",
            Self::Unauthorized => "auth",
        }
    }

    /// Whether `raw` belongs to this family.
    pub fn matches(self, raw: &RawError) -> bool {
        match self {
            Self::Transport => matches!(raw.code.as_deref(), Some("EADDRINUSE" | "EACCES")),
            Self::Connection => {
                raw.origin == Origin::Connection
                    || raw
                        .name
                        .as_deref()
                        .and_then(ConnectionFailure::from_name)
                        .is_some()
            }
            Self::Query => raw.origin == Origin::Query,
            Self::Validation => matches!(raw.origin, Origin::Validation { .. }),
            Self::Unauthorized => raw.origin == Origin::Unauthorized,
        }
    }

    /// Normalizes `raw` as a member of this family, without checking the predicate.
    pub fn normalize(self, raw: &RawError) -> HttpError {
        match self {
            Self::Transport => classify_server_error(raw),
            Self::Connection => classify_connection_error(raw),
            Self::Query => classify_query_error(raw),
            Self::Validation => classify_validation_error(raw),
            Self::Unauthorized => classify_auth_error(raw),
        }
    }
}

impl FromStr for ErrorFamily {
    type Err = SetupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transport" | "server" => Ok(Self::Transport),
            "connection" => Ok(Self::Connection),
            "query" | "database" => Ok(Self::Query),
            "validation" => Ok(Self::Validation),
            "auth" | "unauthorized" | "jwt" => Ok(Self::Unauthorized),
            _ => Err(SetupError::UnknownClassifier(s.trim().to_owned())),
        }
    }
}

/// Ordered list of classifier families; first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRegistry {
    families: Vec<ErrorFamily>,
}

impl Default for ClassifierRegistry {
    fn default() -> Self {
        Self {
            families: ErrorFamily::ALL.to_vec(),
        }
    }
}

impl ClassifierRegistry {
    /// Registry evaluating `families` in the given order. Duplicates are dropped.
    pub fn new(families: impl IntoIterator<Item = ErrorFamily>) -> Self {
        let mut ordered = Vec::new();
        for family in families {
            if !ordered.contains(&family) {
                ordered.push(family);
            }
        }
        Self { families: ordered }
    }

    /// Parses a comma-separated list such as `"validation,auth"`.
    ///
    /// # Errors
    ///
    /// [`SetupError::UnknownClassifier`] for the first unrecognized name.
    pub fn parse(list: &str) -> Result<Self, SetupError> {
        let families = list
            .split(',')
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.parse::<ErrorFamily>())
            .collect::<Result<Vec<ErrorFamily>, _>>()?;
        Ok(Self::new(families))
    }

    pub fn families(&self) -> &[ErrorFamily] {
        &self.families
    }

    /// First family whose predicate accepts `raw`.
    pub fn family_of(&self, raw: &RawError) -> Option<ErrorFamily> {
        self.families
            .iter()
            .copied()
            .find(|family| family.matches(raw))
    }

    /// Normalizes `raw` with the first matching family, or `None` to pass it through.
    pub fn classify(&self, raw: &RawError) -> Option<HttpError> {
        self.family_of(raw).map(|family| family.normalize(raw))
    }
}

/// Failed bind/listen: message templated from the platform error code.
pub fn classify_server_error(raw: &RawError) -> HttpError {
    let port = display_or_unknown(raw.port);
    let message = match raw.code.as_deref() {
        Some("EADDRINUSE") => format!(
            "port {port} of {} already in use",
            raw.address.as_deref().unwrap_or("unknown")
        ),
        Some("EACCES") => format!("port {port} requires elevated privileges"),
        _ => own_message(raw),
    };

    HttpError::derived(StatusCode::INTERNAL_SERVER_ERROR, raw, message)
}

/// Data-store connectivity failure: `<Family> - Failed to connect to database: <reason>`.
pub fn classify_connection_error(raw: &RawError) -> HttpError {
    let name = raw
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or("ConnectionError");
    let reason = match ConnectionFailure::from_name(name) {
        Some(failure) => failure.reason().to_owned(),
        None => own_message(raw),
    };

    HttpError::derived(
        StatusCode::INTERNAL_SERVER_ERROR,
        raw,
        format!("{name} - {CONNECTION_PREFIX}{reason}"),
    )
}

/// Statement execution failure: the failing SQL is appended when known.
pub fn classify_query_error(raw: &RawError) -> HttpError {
    let message = own_message(raw);
    let message = match raw.sql.as_deref() {
        Some(sql) => format!("{message}. Query: {sql}"),
        None => message,
    };

    HttpError::derived(StatusCode::INTERNAL_SERVER_ERROR, raw, message)
}

/// Validation failure: first detail's message, else the wrapped validator's, else its own.
pub fn classify_validation_error(raw: &RawError) -> HttpError {
    let message = match &raw.origin {
        Origin::Validation { details, message } => details
            .first()
            .map(|detail| detail.message.as_str())
            .filter(|message| !message.is_empty())
            .or_else(|| message.as_deref().filter(|message| !message.is_empty()))
            .map(str::to_owned),
        _ => None,
    }
    .unwrap_or_else(|| own_message(raw));

    HttpError::derived(StatusCode::BAD_REQUEST, raw, message)
}

/// Rejected credentials.
pub fn classify_auth_error(raw: &RawError) -> HttpError {
    let message = raw.message_text().unwrap_or(DEFAULT_AUTH_MESSAGE);
    HttpError::derived(StatusCode::UNAUTHORIZED, raw, message)
}

fn own_message(raw: &RawError) -> String {
    raw.message_text()
        .map(str::to_owned)
        .unwrap_or_else(|| raw.to_string())
}

fn display_or_unknown(port: Option<u16>) -> String {
    port.map_or_else(|| "unknown".to_owned(), |port| port.to_string())
}
