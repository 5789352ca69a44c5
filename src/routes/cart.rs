//! Cart routes, scoped to the authenticated user.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::models::cart::{AddToCart, Cart, CartCount, CartItem, CheckoutReceipt, ClearedCart};
use crate::services::cart as cart_service;
use crate::AppState;

/// GET /api/v1/cart
pub async fn get(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Cart>>, AppError> {
    let cart = cart_service::get(&state.db, &user.id).await?;
    Ok(ApiResponse::success(cart))
}

/// GET /api/v1/cart/count
pub async fn count(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<CartCount>>, AppError> {
    let count = cart_service::count(&state.db, &user.id).await?;
    Ok(ApiResponse::success(count))
}

/// POST /api/v1/cart/items: add a movie at its current price.
pub async fn add_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<AddToCart>,
) -> Result<Json<ApiResponse<CartItem>>, AppError> {
    let item = cart_service::add(&state.db, &user.id, body.movie_id).await?;
    Ok(ApiResponse::success(item))
}

/// DELETE /api/v1/cart/items/{id}
pub async fn remove_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(item_id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    cart_service::remove(&state.db, &user.id, item_id).await?;
    Ok(ApiResponse::success(()))
}

/// DELETE /api/v1/cart
pub async fn clear(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<ClearedCart>>, AppError> {
    let cleared = cart_service::clear(&state.db, &user.id).await?;
    Ok(ApiResponse::success(cleared))
}

/// POST /api/v1/cart/checkout: total and empty the cart.
pub async fn checkout(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<CheckoutReceipt>>, AppError> {
    let receipt = cart_service::checkout(&state.db, &user.id).await?;
    Ok(ApiResponse::success(receipt))
}
