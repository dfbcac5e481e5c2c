// handlers/mod.rs - HTTP handlers grouped by security level
//
// public/    - no token required (status, register, login)
// protected/ - bearer token resolved to a user by middleware::require_user

pub mod protected;
pub mod public;
