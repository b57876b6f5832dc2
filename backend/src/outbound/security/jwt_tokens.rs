//! HS256 bearer tokens via `jsonwebtoken`.
//!
//! Expiry is checked against the injected clock rather than the library's
//! own wall-clock check, so tests can move time forward.

use std::fmt;
use std::sync::Arc;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{TokenService, TokenServiceError};
use crate::domain::{AccessToken, TOKEN_TTL, UserId};

const EPHEMERAL_SECRET_LEN: usize = 64;

/// HMAC signing secret.
#[derive(Clone)]
pub struct JwtSecret(Zeroizing<Vec<u8>>);

impl JwtSecret {
    /// Wrap raw secret bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Random secret for development; tokens die with the process.
    pub fn generate() -> Self {
        let mut bytes = vec![0_u8; EPHEMERAL_SECRET_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self::from_bytes(bytes)
    }

    /// Secret length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JwtSecret({} bytes)", self.len())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// `TokenService` issuing one-hour HS256 tokens whose only custom claim is
/// the user id (`sub`).
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build the service from a signing secret and clock.
    pub fn new(secret: &JwtSecret, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs: i64::try_from(TOKEN_TTL.as_secs()).unwrap_or(i64::MAX),
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: &UserId) -> Result<AccessToken, TokenServiceError> {
        let now = self.clock.utc().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|error| TokenServiceError::signing(error.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenServiceError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|error| TokenServiceError::invalid(error.to_string()))?;
        if self.clock.utc().timestamp() >= data.claims.exp {
            return Err(TokenServiceError::expired());
        }
        UserId::new(&data.claims.sub)
            .map_err(|error| TokenServiceError::invalid(format!("bad subject: {error}")))
    }
}
