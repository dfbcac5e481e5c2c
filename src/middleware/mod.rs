pub mod auth;
pub mod response;

pub use auth::{bearer_token, require_user, CurrentUser};
pub use response::{ApiResponse, ApiResult, Message};
