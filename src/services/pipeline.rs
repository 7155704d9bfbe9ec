//! # Error Pipeline
//!
//! A linear chain of [`Stage`]s run once per failed request. Each stage
//! either forwards the (possibly rewritten) error with [`Flow::Next`] or
//! ends the chain with [`Flow::Respond`]. The standard chain built by
//! [`Pipeline::builder`] is classify → log → render.
//!
//! Stages hold no per-request state, so one [`Pipeline`] is shared by every
//! request behind an `Arc`.

use std::fmt;
use std::sync::Arc;

use axum::{http::StatusCode, response::Response};
use tracing::{debug, instrument, trace};

use super::classifier::ClassifierRegistry;
use super::logger::{ErrorLogger, LogSink, TracingSink};
use super::renderer::ResponseRenderer;
use crate::config::Config;
use crate::models::{HttpError, RawError, RequestInfo, explicit_status};

/// An error as it travels through the chain: still raw, or already normalized.
#[derive(Debug, Clone)]
pub enum ErrorValue {
    Raw(RawError),
    Normalized(HttpError),
}

impl ErrorValue {
    /// The HTTP status the error carries, if it carries a recognized one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Raw(raw) => explicit_status(raw),
            Self::Normalized(error) => Some(error.status()),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Raw(raw) => raw.message_text(),
            Self::Normalized(error) => Some(error.message()),
        }
    }

    pub fn stack(&self) -> Option<&str> {
        match self {
            Self::Raw(raw) => raw.stack.as_deref(),
            Self::Normalized(error) => error.stack(),
        }
    }

    /// Normalizes whatever is left: unrecognized raw errors default to 500.
    pub fn into_http_error(self) -> HttpError {
        match self {
            Self::Raw(raw) => HttpError::from_raw(&raw),
            Self::Normalized(error) => error,
        }
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(raw) => fmt::Display::fmt(raw, f),
            Self::Normalized(error) => fmt::Display::fmt(error, f),
        }
    }
}

impl From<RawError> for ErrorValue {
    fn from(raw: RawError) -> Self {
        Self::Raw(raw)
    }
}

impl From<HttpError> for ErrorValue {
    fn from(error: HttpError) -> Self {
        Self::Normalized(error)
    }
}

/// Outcome of one stage.
pub enum Flow {
    /// Hand the error to the next stage.
    Next(ErrorValue),
    /// Terminate the chain with this response.
    Respond(Response),
}

/// One step of the chain.
pub trait Stage: Send + Sync {
    fn handle(&self, error: ErrorValue, request: &RequestInfo) -> Flow;
}

/// Rewrites raw errors of a recognized family; passes everything else through.
#[derive(Debug, Clone, Default)]
pub struct ClassifierStage {
    registry: ClassifierRegistry,
}

impl ClassifierStage {
    pub fn new(registry: ClassifierRegistry) -> Self {
        Self { registry }
    }
}

impl Stage for ClassifierStage {
    fn handle(&self, error: ErrorValue, _request: &RequestInfo) -> Flow {
        let ErrorValue::Raw(raw) = error else {
            return Flow::Next(error);
        };

        match self.registry.family_of(&raw) {
            Some(family) => {
                trace!(family = family.as_str(), "Error classified");
                Flow::Next(ErrorValue::Normalized(family.normalize(&raw)))
            }
            None => {
                trace!("No classifier matched, passing error through");
                Flow::Next(ErrorValue::Raw(raw))
            }
        }
    }
}

impl Stage for ErrorLogger {
    fn handle(&self, error: ErrorValue, _request: &RequestInfo) -> Flow {
        self.log(&error);
        Flow::Next(error)
    }
}

impl Stage for ResponseRenderer {
    fn handle(&self, error: ErrorValue, request: &RequestInfo) -> Flow {
        Flow::Respond(self.render(error, request.format))
    }
}

/// Ordered chain of stages plus the renderer used if the chain runs dry.
#[derive(Clone)]
pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
    fallback: ResponseRenderer,
}

impl Pipeline {
    /// Starts the standard classify → log → render chain for `config`.
    pub fn builder(config: &Config) -> PipelineBuilder {
        PipelineBuilder {
            production: config.production,
            registry: config.classifiers.clone(),
            sink: Arc::new(TracingSink),
        }
    }

    /// A caller-assembled chain. Composition order is the caller's.
    pub fn from_stages(stages: Vec<Arc<dyn Stage>>, production: bool) -> Self {
        Self {
            stages,
            fallback: ResponseRenderer::new(production),
        }
    }

    /// Runs `error` through every stage until one responds.
    #[instrument(
        skip_all,
        fields(
            method = %request.method,
            path = %request.path,
            client = ?request.client,
            request_id = %uuid::Uuid::new_v4()
        )
    )]
    pub fn run(&self, error: impl Into<ErrorValue>, request: &RequestInfo) -> Response {
        let mut error = error.into();
        for stage in &self.stages {
            match stage.handle(error, request) {
                Flow::Next(next) => error = next,
                Flow::Respond(response) => return response,
            }
        }

        debug!("Error chain ended without a response, rendering with defaults");
        self.fallback.render(error, request.format)
    }
}

/// Builder for the standard chain.
pub struct PipelineBuilder {
    production: bool,
    registry: ClassifierRegistry,
    sink: Arc<dyn LogSink>,
}

impl PipelineBuilder {
    /// Sink the logger writes to. Defaults to [`TracingSink`].
    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn classifiers(mut self, registry: ClassifierRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(self) -> Pipeline {
        let stages: Vec<Arc<dyn Stage>> = vec![
            Arc::new(ClassifierStage::new(self.registry)),
            Arc::new(ErrorLogger::new(self.sink, self.production)),
            Arc::new(ResponseRenderer::new(self.production)),
        ];
        Pipeline::from_stages(stages, self.production)
    }
}
