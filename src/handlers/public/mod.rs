// handlers/public/mod.rs - Public handlers (no authentication)

pub mod auth;
pub mod status;

pub use auth::{login_post, register_post};
pub use status::{health_get, root_get};
