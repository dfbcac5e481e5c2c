pub mod account_service;
pub mod product_service;

pub use account_service::{AccessToken, AccountError, AccountService, Credentials};
pub use product_service::{ProductError, ProductService};
