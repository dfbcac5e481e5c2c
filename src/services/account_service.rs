use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::auth::{PasswordError, PasswordHasher, TokenError, TokenService};
use crate::database::{CatalogStore, DatabaseError, User};

/// Matches the width of `users.email`
const MAX_EMAIL_LENGTH: usize = 100;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Token issue failed: {0}")]
    Token(#[from] TokenError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Blocking task failed: {0}")]
    Blocking(String),
}

/// Request body for register and login
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(token: String) -> Self {
        Self {
            access_token: token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Registration, login and per-request identity resolution
pub struct AccountService {
    store: Arc<dyn CatalogStore>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(store: Arc<dyn CatalogStore>, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self { store, hasher, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub async fn register(&self, credentials: Credentials) -> Result<User, AccountError> {
        let email = validate_email(&credentials.email)?;

        if self.store.find_user_by_email(&email).await?.is_some() {
            debug!("Registration rejected, email already in use");
            return Err(AccountError::DuplicateEmail);
        }

        let hasher = self.hasher.clone();
        let password = credentials.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AccountError::Blocking(e.to_string()))??;

        // A concurrent registration can still win the race to the unique index
        let user = match self.store.create_user(&email, &password_hash).await {
            Ok(user) => user,
            Err(DatabaseError::Conflict(_)) => return Err(AccountError::DuplicateEmail),
            Err(e) => return Err(e.into()),
        };

        info!(user_id = user.id, "Registered user");
        Ok(user)
    }

    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn login(&self, credentials: Credentials) -> Result<AccessToken, AccountError> {
        let email = validate_email(&credentials.email)?;

        let hasher = self.hasher.clone();
        let password = credentials.password;

        let Some(user) = self.store.find_user_by_email(&email).await? else {
            tokio::task::spawn_blocking(move || hasher.verify_dummy(&password))
                .await
                .map_err(|e| AccountError::Blocking(e.to_string()))?;
            debug!("Login failed: unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        let stored = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| AccountError::Blocking(e.to_string()))?;

        if !verified {
            debug!(user_id = user.id, "Login failed: password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.email)?;
        info!(user_id = user.id, "Issued access token");
        Ok(AccessToken::bearer(token))
    }

    /// Turns a bearer token into the persisted user it names.
    pub async fn resolve(&self, token: &str) -> Result<User, AccountError> {
        let claims = self.tokens.verify(token).map_err(|e| {
            debug!("Token rejected: {}", e);
            AccountError::Unauthenticated
        })?;

        match self.store.find_user_by_email(&claims.sub).await? {
            Some(user) => Ok(user),
            None => {
                debug!("Token subject has no matching user");
                Err(AccountError::Unauthenticated)
            }
        }
    }
}

/// Trims, checks the shape `local@domain.tld` and lowercases the domain.
pub fn validate_email(raw: &str) -> Result<String, AccountError> {
    let invalid = |message: &str| AccountError::Validation {
        field: "email",
        message: message.to_string(),
    };

    let email = raw.trim();
    if email.is_empty() {
        return Err(invalid("value is required"));
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(invalid("value is too long"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid("value must not contain whitespace"));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid("value is not a valid email address"));
    };
    if local.is_empty() || domain.contains('@') {
        return Err(invalid("value is not a valid email address"));
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid("value is not a valid email address"));
    }

    Ok(format!("{}@{}", local, domain.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{account_service, memory_store};

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_plain_addresses() {
        assert_eq!(validate_email("a@x.com").unwrap(), "a@x.com");
        assert_eq!(validate_email("  first.last@sub.example.org ").unwrap(), "first.last@sub.example.org");
    }

    #[test]
    fn lowercases_domain_but_keeps_local_part() {
        assert_eq!(validate_email("A@X.com").unwrap(), "A@x.com");
        assert_eq!(validate_email(" Jo.Doe@Example.ORG").unwrap(), "Jo.Doe@example.org");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "plain", "@x.com", "a@", "a@x", "a@x.", "a@@x.com", "a b@x.com", "a@x..com"] {
            assert!(
                matches!(validate_email(bad), Err(AccountError::Validation { field: "email", .. })),
                "accepted {:?}",
                bad
            );
        }
        let long = format!("{}@x.com", "a".repeat(100));
        assert!(validate_email(&long).is_err());
    }

    #[tokio::test]
    async fn register_then_login_issues_token_for_email() {
        let accounts = account_service(memory_store());
        accounts.register(creds("a@x.com", "pw1")).await.unwrap();

        let token = accounts.login(creds("a@x.com", "pw1")).await.unwrap();
        assert_eq!(token.token_type, "bearer");

        let claims = accounts.tokens().verify(&token.access_token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
    }

    #[tokio::test]
    async fn register_stores_hash_not_password() {
        let store = memory_store();
        let accounts = account_service(store.clone());
        let user = accounts.register(creds("a@x.com", "pw1")).await.unwrap();
        assert_ne!(user.password_hash, "pw1");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_regardless_of_password() {
        let accounts = account_service(memory_store());
        accounts.register(creds("a@x.com", "pw1")).await.unwrap();

        for password in ["pw1", "other"] {
            let err = accounts.register(creds("a@x.com", password)).await.unwrap_err();
            assert!(matches!(err, AccountError::DuplicateEmail));
        }
    }

    #[tokio::test]
    async fn domain_case_does_not_create_a_second_account() {
        let accounts = account_service(memory_store());
        accounts.register(creds("a@x.com", "pw1")).await.unwrap();

        let err = accounts.register(creds("a@X.COM", "pw2")).await.unwrap_err();
        assert!(matches!(err, AccountError::DuplicateEmail));

        let token = accounts.login(creds("a@X.Com", "pw1")).await.unwrap();
        let claims = accounts.tokens().verify(&token.access_token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
    }

    #[tokio::test]
    async fn unknown_email_login_still_runs_a_verification() {
        let accounts = account_service(memory_store());
        assert!(!accounts.hasher.verify_dummy("pw1"));

        let err = accounts.login(creds("nobody@x.com", "pw1")).await.unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let accounts = account_service(memory_store());
        accounts.register(creds("a@x.com", "pw1")).await.unwrap();

        let wrong = accounts.login(creds("a@x.com", "nope")).await.unwrap_err();
        let unknown = accounts.login(creds("b@x.com", "pw1")).await.unwrap_err();
        assert!(matches!(wrong, AccountError::InvalidCredentials));
        assert!(matches!(unknown, AccountError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn token_resolves_to_its_own_user() {
        let accounts = account_service(memory_store());
        let a = accounts.register(creds("a@x.com", "pw1")).await.unwrap();
        let b = accounts.register(creds("b@x.com", "pw2")).await.unwrap();

        let token_a = accounts.login(creds("a@x.com", "pw1")).await.unwrap();
        let token_b = accounts.login(creds("b@x.com", "pw2")).await.unwrap();

        assert_eq!(accounts.resolve(&token_a.access_token).await.unwrap().id, a.id);
        assert_eq!(accounts.resolve(&token_b.access_token).await.unwrap().id, b.id);
    }

    #[tokio::test]
    async fn resolve_rejects_bad_tokens_and_missing_users() {
        let accounts = account_service(memory_store());
        assert!(matches!(accounts.resolve("garbage").await, Err(AccountError::Unauthenticated)));

        // Valid signature, but nobody registered under this subject
        let orphan = accounts.tokens().issue("ghost@x.com").unwrap();
        assert!(matches!(accounts.resolve(&orphan).await, Err(AccountError::Unauthenticated)));
    }
}
