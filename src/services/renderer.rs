//! # Response Renderer
//!
//! Terminal stage: decides what the client may see and writes it as plain
//! text or JSON. Server errors are redacted in production unless the error
//! explicitly marks itself as safe to expose; the real detail has already
//! been logged by then.

use axum::{
    Json,
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::pipeline::ErrorValue;
use crate::models::{HttpError, ResponseFormat};
use crate::utils::constant::{REDACTED_MESSAGE, REDACTED_NAME};

/// Client-visible error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub name: String,
    pub message: String,
}

impl ErrorBody {
    /// `Error <status> - <name>: <message>`
    pub fn to_text(&self) -> String {
        format!("Error {} - {}: {}", self.status, self.name, self.message)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseRenderer {
    production: bool,
}

impl ResponseRenderer {
    pub fn new(production: bool) -> Self {
        Self { production }
    }

    /// Client-visible view of `error`.
    pub fn body(&self, error: &HttpError) -> ErrorBody {
        let status = error.status().as_u16();
        let redact = self.production && status >= 500 && !error.expose();

        if redact {
            ErrorBody {
                status,
                name: REDACTED_NAME.to_owned(),
                message: REDACTED_MESSAGE.to_owned(),
            }
        } else {
            ErrorBody {
                status,
                name: error.name().to_owned(),
                message: error.message().to_owned(),
            }
        }
    }

    pub fn render(&self, error: ErrorValue, format: ResponseFormat) -> Response {
        let error = error.into_http_error();
        let body = self.body(&error);
        let status = error.status();

        match format {
            ResponseFormat::Text => (
                status,
                [(header::CONTENT_TYPE, format.content_type())],
                body.to_text(),
            )
                .into_response(),
            ResponseFormat::Json => (status, Json(body)).into_response(),
        }
    }
}
