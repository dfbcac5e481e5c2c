use chrono::Duration;
use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenError, TokenService};
use crate::config::AppConfig;
use crate::database::CatalogStore;
use crate::services::{AccountService, ProductService};

/// Shared, immutable per-process state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub accounts: Arc<AccountService>,
    pub products: Arc<ProductService>,
}

impl AppState {
    pub fn new(config: &AppConfig, store: Arc<dyn CatalogStore>) -> anyhow::Result<Self> {
        let hasher = PasswordHasher::new(&config.security.password_hash)?;
        let lifetime = i64::try_from(config.security.jwt_expiry_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .ok_or(TokenError::InvalidLifetime)?;
        let tokens = TokenService::new(&config.security.jwt_secret, lifetime)?;

        Ok(Self {
            accounts: Arc::new(AccountService::new(store.clone(), hasher, tokens)),
            products: Arc::new(ProductService::new(store.clone())),
            store,
        })
    }
}
