pub mod manager;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{NewProduct, Product, User};
pub use repository::PgCatalogStore;
pub use store::CatalogStore;
