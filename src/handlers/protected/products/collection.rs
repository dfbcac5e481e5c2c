// handlers/protected/products/collection.rs - POST/GET /products handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::database::{NewProduct, Product};
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::state::AppState;

/// POST /products - create a product owned by the caller
pub async fn post(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(product) = payload?;
    let created = state.products.create(&user, product).await?;
    Ok(ApiResponse::created(created))
}

/// GET /products - the caller's products
pub async fn get(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Vec<Product>> {
    let products = state.products.list(&user).await?;
    Ok(ApiResponse::success(products))
}
