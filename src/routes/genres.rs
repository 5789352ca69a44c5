//! Genre routes.

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireAdmin;
use crate::models::genre::{Genre, GenreInput, GenreWithCount};
use crate::services::genre as genre_service;
use crate::AppState;

/// GET /api/v1/genres: all genres with movie counts.
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<GenreWithCount>>>, AppError> {
    let genres = genre_service::list(&state.db).await?;
    Ok(ApiResponse::success(genres))
}

/// GET /api/v1/genres/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Genre>>, AppError> {
    let genre = genre_service::find_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(genre))
}

/// POST /api/v1/genres (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<GenreInput>,
) -> Result<Json<ApiResponse<Genre>>, AppError> {
    body.validate()?;
    let genre = genre_service::create(&state.db, &body).await?;
    Ok(ApiResponse::success(genre))
}

/// PUT /api/v1/genres/{id} (admin)
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Json(body): Json<GenreInput>,
) -> Result<Json<ApiResponse<Genre>>, AppError> {
    body.validate()?;
    let genre = genre_service::update(&state.db, id, &body).await?;
    Ok(ApiResponse::success(genre))
}

/// DELETE /api/v1/genres/{id} (admin): refused while movies use the genre.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    genre_service::delete(&state.db, id).await?;
    Ok(ApiResponse::success(()))
}
