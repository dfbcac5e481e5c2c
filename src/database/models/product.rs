use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub user_id: i32,
}

/// Request body for creating a product
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}
