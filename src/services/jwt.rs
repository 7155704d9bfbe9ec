//! # JWT Service
//!
//! Access-token issuance and validation for the demo host. Validation
//! failures are returned as the library's own error so they reach the error
//! pipeline as authentication errors.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretSlice};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::utils::constant::ACCESS_TOKEN_EXPIRY;

/// JWT claims structure for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as string)
    pub sub: String,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
}

/// Service for signing and verifying access tokens
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Creates a new JWT service with the provided keys.
    pub fn new(encoding_key: EncodingKey, decoding_key: DecodingKey) -> Self {
        Self {
            encoding_key,
            decoding_key,
        }
    }

    /// Creates a service signing and verifying with one shared secret.
    pub fn from_secret(secret: &SecretSlice<u8>) -> Self {
        Self::new(
            EncodingKey::from_secret(secret.expose_secret()),
            DecodingKey::from_secret(secret.expose_secret()),
        )
    }

    /// Issues an access token for `subject`, valid for [`ACCESS_TOKEN_EXPIRY`].
    #[instrument(skip(self))]
    pub fn issue_access_token(&self, subject: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();

        let claims = Claims {
            sub: subject.to_owned(),
            exp: now + ACCESS_TOKEN_EXPIRY.as_secs(),
            iat: now,
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        trace!("Access token created");
        Ok(token)
    }

    /// Validates an access token and returns its claims.
    ///
    /// # Errors
    ///
    /// The underlying [`jsonwebtoken::errors::Error`] when the token is
    /// malformed, expired, or has an invalid signature.
    #[instrument(skip_all, fields(token_length = token.len()))]
    pub fn validate_access_token(
        &self,
        token: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        trace!("Validating access token");

        match decode::<Claims>(token, &self.decoding_key, &Validation::default()) {
            Ok(token_data) => {
                trace!(subject = %token_data.claims.sub, "Access token validated successfully");
                Ok(token_data.claims)
            }
            Err(e) => {
                debug!(error = %e, "Invalid access token");
                Err(e)
            }
        }
    }
}
