//! Bearer token issuance.
//!
//! Signs compact, time-bounded JWTs carrying the account identity. Expiry
//! is stamped by the issuer but enforced by whoever verifies the token.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppResult;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Signs and verifies bearer tokens with a process-wide secret.
///
/// The secret is loaded once at startup and never logged.
pub struct TokenIssuer {
    secret: Vec<u8>,
    expiration_hours: i64,
}

impl TokenIssuer {
    /// Create a new issuer with an explicit secret and expiry.
    pub fn new(secret: impl Into<Vec<u8>>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }

    /// Create an issuer from application configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jwt_secret_bytes(), config.jwt_expiration_hours)
    }

    /// Issue a signed token for an account.
    pub fn issue(&self, account_id: Uuid, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.expiration_hours);

        let claims = Claims {
            sub: account_id,
            email: email.to_owned(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )?;

        Ok(token)
    }

    /// Decode a token and validate its signature and expiry.
    ///
    /// This is the contract consumed by transport-layer auth guards; the
    /// service itself never verifies tokens on the request path.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
