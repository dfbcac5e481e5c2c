use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::auth::{PasswordHasher, TokenService};
use crate::config::{AppConfig, PasswordHashConfig};
use crate::database::{CatalogStore, DatabaseError, Product, User};
use crate::services::{AccountService, ProductService};
use crate::state::AppState;

pub const TEST_SECRET: &str = "test-signing-key";

/// In-process `CatalogStore` with the same id and uniqueness behaviour as
/// the Postgres tables.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    products: Vec<Product>,
    next_user_id: i32,
    next_product_id: i32,
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.inner.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, DatabaseError> {
        let mut tables = self.inner.write().await;
        if tables.users.iter().any(|u| u.email == email) {
            return Err(DatabaseError::Conflict("User already exists".to_string()));
        }
        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn create_product(&self, user_id: i32, name: &str, price: f64) -> Result<Product, DatabaseError> {
        let mut tables = self.inner.write().await;
        tables.next_product_id += 1;
        let product = Product {
            id: tables.next_product_id,
            name: name.to_string(),
            price,
            user_id,
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn products_for_user(&self, user_id: i32) -> Result<Vec<Product>, DatabaseError> {
        let tables = self.inner.read().await;
        Ok(tables.products.iter().filter(|p| p.user_id == user_id).cloned().collect())
    }

    async fn find_product(&self, id: i32) -> Result<Option<Product>, DatabaseError> {
        let tables = self.inner.read().await;
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }

    async fn delete_product(&self, id: i32) -> Result<bool, DatabaseError> {
        let mut tables = self.inner.write().await;
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        Ok(tables.products.len() != before)
    }
}

pub fn memory_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::default())
}

/// Inserts a user directly, skipping password hashing
pub async fn seed_user(store: &Arc<MemoryStore>, email: &str) -> User {
    store.create_user(email, "unused-hash").await.expect("seed user")
}

/// Cheap Argon2 parameters so tests stay fast
pub fn fast_hash_config() -> PasswordHashConfig {
    PasswordHashConfig {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = TEST_SECRET.to_string();
    config.security.password_hash = fast_hash_config();
    config.api.enable_request_logging = false;
    config
}

pub fn account_service(store: Arc<MemoryStore>) -> AccountService {
    let hasher = PasswordHasher::new(&fast_hash_config()).expect("hasher");
    let tokens = TokenService::new(TEST_SECRET, Duration::minutes(30)).expect("tokens");
    AccountService::new(store, hasher, tokens)
}

pub fn test_state(store: Arc<MemoryStore>) -> AppState {
    AppState {
        accounts: Arc::new(account_service(store.clone())),
        products: Arc::new(ProductService::new(store.clone())),
        store,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_enforces_unique_email() {
        let store = memory_store();
        let first = store.create_user("a@x.com", "h").await.unwrap();
        assert_eq!(first.id, 1);
        let err = store.create_user("a@x.com", "h").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)));
    }

    #[tokio::test]
    async fn memory_store_ids_are_not_reused() {
        let store = memory_store();
        let p1 = store.create_product(1, "Pen", 1.5).await.unwrap();
        assert!(store.delete_product(p1.id).await.unwrap());
        assert!(!store.delete_product(p1.id).await.unwrap());
        let p2 = store.create_product(1, "Pen", 1.5).await.unwrap();
        assert_ne!(p1.id, p2.id);
    }
}
