use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};
use password_hash::{PasswordHash, SaltString};
use thiserror::Error;

use crate::config::PasswordHashConfig;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Invalid hashing parameters: {0}")]
    Params(String),

    #[error("Salt generation failed: {0}")]
    Salt(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// Salted Argon2id hashing. Hashes are stored as PHC strings, so the
/// parameters used for a given hash travel with it.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    /// Hash with the configured cost that no submitted password matches
    dummy_hash: String,
}

impl PasswordHasher {
    pub fn new(config: &PasswordHashConfig) -> Result<Self, PasswordError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| PasswordError::Params(e.to_string()))?;

        let mut hasher = Self {
            params,
            dummy_hash: String::new(),
        };
        let mut secret = [0u8; 32];
        getrandom::getrandom(&mut secret).map_err(|e| PasswordError::Salt(e.to_string()))?;
        hasher.dummy_hash = hasher.hash_bytes(&secret)?;
        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        self.hash_bytes(password.as_bytes())
    }

    fn hash_bytes(&self, password: &[u8]) -> Result<String, PasswordError> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes).map_err(|e| PasswordError::Salt(e.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Salt(e.to_string()))?;

        let phc = self
            .argon2()
            .hash_password(password, &salt)
            .map_err(|e| PasswordError::Hash(e.to_string()))?
            .to_string();
        Ok(phc)
    }

    /// False for a wrong password and for a stored hash that does not parse.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self.argon2().verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }

    /// Spends one full verification on a password that has no stored hash,
    /// so a miss on the account lookup costs as much as a wrong password.
    pub fn verify_dummy(&self, password: &str) -> bool {
        self.verify(password, &self.dummy_hash)
    }
}
