// handlers/public/auth/login.rs - POST /login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{AccessToken, Credentials};
use crate::state::AppState;

/// POST /login - exchange credentials for a bearer token
///
/// Returns `{"access_token": "...", "token_type": "bearer"}`. Unknown email
/// and wrong password both answer 401 "Invalid credentials".
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<AccessToken> {
    let Json(credentials) = payload?;
    let token = state.accounts.login(credentials).await?;
    Ok(ApiResponse::success(token))
}
