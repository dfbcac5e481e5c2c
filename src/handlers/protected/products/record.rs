// handlers/protected/products/record.rs - GET/DELETE /products/:id handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension,
};

use crate::database::Product;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser, Message};
use crate::state::AppState;

/// GET /products/:id - one of the caller's products, 404 otherwise
pub async fn get(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Product> {
    let Path(id) = id?;
    let product = state.products.get(&user, id).await?;
    Ok(ApiResponse::success(product))
}

/// DELETE /products/:id - same ownership rule as GET
pub async fn delete(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Message> {
    let Path(id) = id?;
    state.products.delete(&user, id).await?;
    Ok(ApiResponse::success(Message::new("Product deleted")))
}
