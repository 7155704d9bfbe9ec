//! # Runtime Configuration
//!
//! Configuration is read from the environment exactly once, then passed
//! explicitly into [`Pipeline::builder`](crate::services::pipeline::Pipeline::builder)
//! and the host router. Nothing downstream re-reads process state per request.
//!
//! ## Environment Variables
//!
//! - `APP_ENV` - "production" enables production-like mode (redaction, no stack traces in logs)
//! - `ERROR_CLASSIFIERS` - Optional comma-separated, ordered list of classifier families
//! - `BIND_ADDRESS` - Listen address for the demo host (default `0.0.0.0:8090`)
//! - `JWT_SECRET` - Required by the demo host for access-token validation
//! - `DATABASE_URL` - Required by the demo host; the pool connects lazily

use std::env;
use std::net::SocketAddr;

use secrecy::SecretSlice;
use tracing::{debug, info};

use crate::error::{SetupError, SetupResult};
use crate::services::classifier::ClassifierRegistry;
use crate::utils::constant::DEFAULT_BIND_ADDRESS;

/// Error pipeline configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Production-like mode: hides 5xx detail from clients and stack traces from logs.
    pub production: bool,
    /// Ordered classifier families, first match wins.
    pub classifiers: ClassifierRegistry,
}

impl Config {
    /// Development configuration with every classifier family in canonical order.
    pub fn development() -> Self {
        Self::default()
    }

    /// Production-like configuration with every classifier family in canonical order.
    pub fn production() -> Self {
        Self {
            production: true,
            ..Self::default()
        }
    }

    /// Reads `APP_ENV` and `ERROR_CLASSIFIERS` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingEnv`] when `APP_ENV` is unset and
    /// [`SetupError::UnknownClassifier`] when `ERROR_CLASSIFIERS` names an
    /// unrecognized family.
    pub fn from_env() -> SetupResult<Self> {
        let app_env = env::var("APP_ENV")
            .map_err(|_| SetupError::MissingEnv("APP_ENV"))?
            .to_ascii_lowercase();
        let production = app_env == "production";

        let classifiers = match env::var("ERROR_CLASSIFIERS") {
            Ok(list) if !list.trim().is_empty() => ClassifierRegistry::parse(&list)?,
            _ => ClassifierRegistry::default(),
        };

        if production {
            info!("Error pipeline running in production mode");
        } else {
            info!("Error pipeline running in development mode");
        }
        debug!(classifiers = ?classifiers.families(), "Configured error classifiers");

        Ok(Self {
            production,
            classifiers,
        })
    }
}

/// Settings that only the demo host application needs.
pub struct HostSettings {
    pub bind_address: SocketAddr,
    pub jwt_secret: SecretSlice<u8>,
    pub database_url: String,
}

impl HostSettings {
    /// Reads `BIND_ADDRESS`, `JWT_SECRET` and `DATABASE_URL` from the environment.
    pub fn from_env() -> SetupResult<Self> {
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.into());
        let bind_address: SocketAddr = bind_address
            .parse()
            .map_err(|_| SetupError::InvalidBindAddress(bind_address))?;

        let jwt_secret = SecretSlice::from(
            env::var("JWT_SECRET")
                .map_err(|_| SetupError::MissingEnv("JWT_SECRET"))?
                .into_bytes(),
        );

        let database_url =
            env::var("DATABASE_URL").map_err(|_| SetupError::MissingEnv("DATABASE_URL"))?;

        Ok(Self {
            bind_address,
            jwt_secret,
            database_url,
        })
    }
}
