// handlers/protected/products/mod.rs - Ownership-scoped product handlers

pub mod collection;
pub mod record;

// Re-export handler functions for use in routing
pub use collection::get as products_get;
pub use collection::post as products_post;

pub use record::delete as product_delete;
pub use record::get as product_get;
