use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{Product, User};
use super::store::CatalogStore;

/// `CatalogStore` backed by Postgres
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT id, email, password FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password) VALUES ($1, $2) RETURNING id, email, password",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_insert(e, "User"))
    }

    async fn create_product(&self, user_id: i32, name: &str, price: f64) -> Result<Product, DatabaseError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, user_id
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    async fn products_for_user(&self, user_id: i32) -> Result<Vec<Product>, DatabaseError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, user_id FROM products WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    async fn find_product(&self, id: i32) -> Result<Option<Product>, DatabaseError> {
        let product = sqlx::query_as::<_, Product>("SELECT id, name, price, user_id FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn delete_product(&self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
