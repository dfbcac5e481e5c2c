use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::database::{CatalogStore, DatabaseError, NewProduct, Product, User};

/// Matches the width of `products.name`
const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// Covers both a missing product and one owned by someone else.
    #[error("Product not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Product operations scoped to the owning user
pub struct ProductService {
    store: Arc<dyn CatalogStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, owner: &User, product: NewProduct) -> Result<Product, ProductError> {
        if product.name.chars().count() > MAX_NAME_LENGTH {
            return Err(ProductError::Validation {
                field: "name",
                message: format!("value must be at most {} characters", MAX_NAME_LENGTH),
            });
        }
        if !product.price.is_finite() {
            return Err(ProductError::Validation {
                field: "price",
                message: "value must be a finite number".to_string(),
            });
        }

        let created = self.store.create_product(owner.id, &product.name, product.price).await?;
        info!(user_id = owner.id, product_id = created.id, "Created product");
        Ok(created)
    }

    pub async fn list(&self, owner: &User) -> Result<Vec<Product>, ProductError> {
        Ok(self.store.products_for_user(owner.id).await?)
    }

    pub async fn get(&self, owner: &User, id: i32) -> Result<Product, ProductError> {
        match self.store.find_product(id).await? {
            Some(product) if product.user_id == owner.id => Ok(product),
            _ => Err(ProductError::NotFound),
        }
    }

    pub async fn delete(&self, owner: &User, id: i32) -> Result<(), ProductError> {
        let product = self.get(owner, id).await?;

        // Another request may have removed it between the lookup and here
        if !self.store.delete_product(product.id).await? {
            return Err(ProductError::NotFound);
        }

        info!(user_id = owner.id, product_id = product.id, "Deleted product");
        Ok(())
    }
}
