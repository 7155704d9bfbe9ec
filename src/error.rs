//! # Setup Errors
//!
//! Everything that can go wrong while assembling the error pipeline or the
//! host application. Request-time processing never fails: classifiers are
//! total and the renderer always produces a response, so the only fallible
//! surface is construction.

use thiserror::Error;

/// Misconfiguration detected while building the pipeline or the host app.
///
/// These are raised immediately at construction time, never deferred to the
/// first request.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("unknown error classifier `{0}`")]
    UnknownClassifier(String),

    #[error("env variable `{0}` should be set")]
    MissingEnv(&'static str),

    #[error("invalid bind address `{0}`")]
    InvalidBindAddress(String),

    #[error("invalid database configuration")]
    Database(#[from] sqlx::Error),
}

/// Convenience Result type alias for construction-time operations.
pub type SetupResult<T> = Result<T, SetupError>;
