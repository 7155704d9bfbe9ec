//! # Error Logger
//!
//! Writes an error to an injected [`LogSink`], at warning severity for
//! client faults and error severity for everything else. Outside production
//! the diagnostic trace is appended to the logged text.
//!
//! Logging is synchronous, fire-and-forget delegation: no buffering, no
//! retries, and failures inside the sink are not caught.

use std::sync::Arc;

use axum::http::StatusCode;

use super::pipeline::ErrorValue;

/// Destination for logged errors.
///
/// `error` is required. `warn` is optional and falls back to `error`, so a
/// sink can never be built without an error-level operation.
pub trait LogSink: Send + Sync {
    fn error(&self, text: &str);

    fn warn(&self, text: &str) {
        self.error(text);
    }
}

/// Forwards to the `tracing` macros under the `faultline` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn error(&self, text: &str) {
        tracing::error!(target: "faultline", "{text}");
    }

    fn warn(&self, text: &str) {
        tracing::warn!(target: "faultline", "{text}");
    }
}

/// Severity chosen for a logged error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// Client faults (a recognized status below 500) are warnings; everything
    /// else, including errors without a status, is an error.
    pub fn for_status(status: Option<StatusCode>) -> Self {
        match status {
            Some(status) if status.as_u16() < 500 => Self::Warning,
            _ => Self::Error,
        }
    }
}

/// Logs errors to a sink. Cheap to clone.
#[derive(Clone)]
pub struct ErrorLogger {
    sink: Arc<dyn LogSink>,
    production: bool,
}

impl ErrorLogger {
    pub fn new(sink: Arc<dyn LogSink>, production: bool) -> Self {
        Self { sink, production }
    }

    pub fn log(&self, error: &ErrorValue) {
        self.log_with(error, None);
    }

    /// Logs `error`, replacing its text with `message` when one is given.
    pub fn log_with(&self, error: &ErrorValue, message: Option<&str>) {
        let text = self.entry(error, message);
        match Severity::for_status(error.status()) {
            Severity::Warning => self.sink.warn(&text),
            Severity::Error => self.sink.error(&text),
        }
    }

    /// Text that [`log_with`](Self::log_with) hands to the sink.
    ///
    /// Override message if non-empty, else the error's message, else the
    /// stringified error; followed outside production by `\n\n<stack>\n`.
    pub fn entry(&self, error: &ErrorValue, message: Option<&str>) -> String {
        let mut text = message
            .filter(|message| !message.is_empty())
            .map(str::to_owned)
            .or_else(|| error.message().map(str::to_owned))
            .unwrap_or_else(|| error.to_string());

        if !self.production
            && let Some(stack) = error.stack()
        {
            text.push_str("\n\n");
            text.push_str(stack);
            text.push('\n');
        }

        text
    }
}
