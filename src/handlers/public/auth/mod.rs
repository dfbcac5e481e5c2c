// handlers/public/auth/mod.rs - Account creation and token acquisition

pub mod login;    // POST /login - exchange credentials for a bearer token
pub mod register; // POST /register - create new account

pub use login::login_post;
pub use register::register_post;
