//! Bearer token handling
//!
//! Tokens are HS256-signed JWTs binding a user identifier to an absolute
//! expiry. Verification is total: every parse, signature, or expiry failure
//! collapses to `None`, so callers can never distinguish why a credential
//! was bad.

use crate::config::AuthConfig;
use crate::utils::error::{HubError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

/// JWT handler for token operations
#[derive(Clone)]
pub struct JwtHandler {
    /// Encoding key for signing tokens
    encoding_key: EncodingKey,
    /// Decoding key for verifying tokens
    decoding_key: DecodingKey,
    /// JWT algorithm
    algorithm: Algorithm,
    /// Token lifetime in seconds
    expiration: u64,
    /// Token issuer
    issuer: String,
}

impl std::fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtHandler")
            .field("algorithm", &self.algorithm)
            .field("expiration", &self.expiration)
            .field("issuer", &self.issuer)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
    /// Issuer
    pub iss: String,
}

impl JwtHandler {
    /// Create a new JWT handler from validated configuration
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
            issuer: "messhub".to_string(),
        }
    }

    /// Issue a signed token for a user
    pub fn create_token(&self, user_id: Uuid) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| HubError::internal(format!("System time error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.expiration,
            iss: self.issuer.clone(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)?;

        debug!("Issued token for user: {}", user_id);
        Ok(token)
    }

    /// Verify a token, returning the embedded user identifier.
    ///
    /// Returns `None` for any failure; the caller cannot tell a forged token
    /// from an expired one.
    pub fn verify_token(&self, token: &str) -> Option<Uuid> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => {
                debug!("Token verified for user: {}", data.claims.sub);
                Some(data.claims.sub)
            }
            Err(e) => {
                warn!("Token verification failed: {}", e);
                None
            }
        }
    }

    /// Extract token from an Authorization header value
    pub fn extract_token_from_header(header_value: &str) -> Option<&str> {
        header_value.strip_prefix("Bearer ")
    }

    /// Configured token lifetime in seconds
    pub fn expiration(&self) -> u64 {
        self.expiration
    }
}
