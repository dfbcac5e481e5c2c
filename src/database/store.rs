use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{Product, User};

/// Persistence for users and their products.
///
/// Each method is a single statement against the store. Ownership is not
/// enforced here: callers scope product access by comparing `user_id`.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Fails with `DatabaseError::Conflict` when the email is already taken.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, DatabaseError>;

    async fn create_product(&self, user_id: i32, name: &str, price: f64) -> Result<Product, DatabaseError>;

    /// All products owned by `user_id`, ordered by id
    async fn products_for_user(&self, user_id: i32) -> Result<Vec<Product>, DatabaseError>;

    async fn find_product(&self, id: i32) -> Result<Option<Product>, DatabaseError>;

    /// Returns whether a row was removed
    async fn delete_product(&self, id: i32) -> Result<bool, DatabaseError>;
}
