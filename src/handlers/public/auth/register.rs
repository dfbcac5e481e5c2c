// handlers/public/auth/register.rs - POST /register handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::middleware::{ApiResponse, ApiResult, Message};
use crate::services::Credentials;
use crate::state::AppState;

/// POST /register - create an account
///
/// Input: `{"email": "...", "password": "..."}`. No token is issued here;
/// clients call `/login` afterwards. A taken email yields 400.
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Message> {
    let Json(credentials) = payload?;
    state.accounts.register(credentials).await?;
    Ok(ApiResponse::success(Message::new("User registered successfully")))
}
