// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Routes here sit behind middleware::require_user, which places the
// resolved CurrentUser in the request extensions. Handlers take it as an
// explicit Extension parameter and scope every store access to it.

pub mod products;

pub use products::*;
