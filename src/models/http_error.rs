//! # Normalized HTTP Errors
//!
//! [`HttpError`] is the canonical shape every classified error ends up in.
//! It is built once per classification step and never mutated afterwards.

use std::fmt;

use axum::http::StatusCode;
use serde_json::Value;

use super::raw::RawError;

/// Normalized error: status, name, message, optional trace and expose flag.
///
/// Invariants: `status` is a valid status in `[100, 599]` and `message` is
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    status: StatusCode,
    name: String,
    message: String,
    stack: Option<String>,
    expose: bool,
}

impl HttpError {
    /// Builds an error named after its status, exposed only when it is a client fault.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            status.canonical_reason().unwrap_or("Error").to_owned()
        } else {
            message
        };

        Self {
            status,
            name: status_name(status),
            message,
            stack: None,
            expose: status.as_u16() < 500,
        }
    }

    /// Builds the classified form of `raw`: fixed status, new message, the
    /// raw error's trace and expose override carried over.
    pub fn derived(status: StatusCode, raw: &RawError, message: impl Into<String>) -> Self {
        let mut error = Self::new(status, message);
        error.stack = raw.stack.clone();
        if let Some(expose) = raw.expose {
            error.expose = expose;
        }
        error
    }

    /// Normalizes an error no classifier recognized.
    ///
    /// The status falls back to 500, the name to the status name, and the
    /// message to the stringified error.
    pub fn from_raw(raw: &RawError) -> Self {
        let status = resolve_status(raw);
        let message = raw
            .message_text()
            .map(str::to_owned)
            .unwrap_or_else(|| raw.to_string());

        let mut error = Self::derived(status, raw, message);
        if let Some(name) = raw.name.as_deref().filter(|name| !name.is_empty()) {
            error.name = name.to_owned();
        }
        error
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn exposed(mut self, expose: bool) -> Self {
        self.expose = expose;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    pub fn expose(&self) -> bool {
        self.expose
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for HttpError {}

/// Status the raw error explicitly carries, if any.
///
/// Prefers `status`, then a nested `response.status`. Values that do not
/// parse or fall outside `[100, 599]` count as absent.
pub fn explicit_status(raw: &RawError) -> Option<StatusCode> {
    raw.status.as_ref().and_then(parse_status).or_else(|| {
        raw.response
            .as_ref()
            .and_then(|response| response.status.as_ref())
            .and_then(parse_status)
    })
}

/// Status to respond with: the explicit one, otherwise 500.
pub fn resolve_status(raw: &RawError) -> StatusCode {
    explicit_status(raw).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Parses a status value the way a lenient integer parse would: numbers are
/// truncated, strings contribute their leading digits (`"404 Not Found"`).
pub fn parse_status(value: &Value) -> Option<StatusCode> {
    let code = match value {
        Value::Number(number) => match number.as_u64() {
            Some(code) => code,
            None => {
                let float = number.as_f64()?;
                if !float.is_finite() || float < 0.0 {
                    return None;
                }
                float.trunc() as u64
            }
        },
        Value::String(text) => {
            let text = text.trim_start();
            let text = text.strip_prefix('+').unwrap_or(text);
            let digits = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
            text[..digits].parse().ok()?
        }
        _ => return None,
    };

    if !(100..=599).contains(&code) {
        return None;
    }
    StatusCode::from_u16(u16::try_from(code).ok()?).ok()
}

/// PascalCase label for a status: `400 -> BadRequest`, `418 -> ImATeapot`.
pub fn status_name(status: StatusCode) -> String {
    let Some(reason) = status.canonical_reason() else {
        return match status.as_u16() {
            400..=499 => "ClientError".into(),
            500..=599 => "ServerError".into(),
            _ => "HttpError".into(),
        };
    };

    reason
        .replace('\'', "")
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
