pub mod password;

pub use password::{PasswordError, PasswordHasher};

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by an access token. `sub` is the user's email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Fails when `now + lifetime` falls outside the representable range.
    pub fn new(subject: impl Into<String>, lifetime: Duration) -> Result<Self, TokenError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| TokenError::Generation("token expiry out of range".to_string()))?;
        Ok(Self {
            sub: subject.into(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Invalid token lifetime")]
    InvalidLifetime,

    #[error("JWT generation error: {0}")]
    Generation(String),

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Issues and verifies HS256 access tokens with a process-wide signing key.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(secret: &str, lifetime: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }
        if lifetime <= Duration::zero() || Utc::now().checked_add_signed(lifetime).is_none() {
            return Err(TokenError::InvalidLifetime);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime,
        })
    }

    /// Seconds until a freshly issued token expires
    pub fn expires_in(&self) -> i64 {
        self.lifetime.num_seconds()
    }

    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.encode(&Claims::new(subject, self.lifetime)?)
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Checks signature and expiry and returns the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        if data.claims.sub.is_empty() {
            return Err(TokenError::Invalid("missing subject".to_string()));
        }

        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
