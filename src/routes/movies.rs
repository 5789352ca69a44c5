//! Movie catalog routes: search, search options, details and CRUD.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireAdmin;
use crate::models::movie::{MovieDetails, MovieInput};
use crate::models::search::{SearchCriteria, SearchParams};
use crate::services::movie::{self as movie_service, MovieSearchResult, SearchOptions};
use crate::AppState;

/// GET /api/v1/movies: filtered, sorted, paginated movie search.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<MovieSearchResult>>, AppError> {
    let result = movie_service::search(&state.db, SearchCriteria::from(params)).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/movies/search-options: sort, order, page size and genre pickers.
pub async fn search_options(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SearchOptions>>, AppError> {
    let options = movie_service::search_options(&state.db).await?;
    Ok(ApiResponse::success(options))
}

/// GET /api/v1/movies/{id}: movie with genres and credits.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MovieDetails>>, AppError> {
    let movie = movie_service::find_details(&state.db, id).await?;
    Ok(ApiResponse::success(movie))
}

/// POST /api/v1/movies: create a movie (admin).
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<MovieInput>,
) -> Result<Json<ApiResponse<MovieDetails>>, AppError> {
    body.validate()?;
    let movie = movie_service::create(&state.db, &body).await?;
    Ok(ApiResponse::success(movie))
}

/// PUT /api/v1/movies/{id}: replace a movie and its genres (admin).
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Json(body): Json<MovieInput>,
) -> Result<Json<ApiResponse<MovieDetails>>, AppError> {
    body.validate()?;
    let movie = movie_service::update(&state.db, id, &body).await?;
    Ok(ApiResponse::success(movie))
}

/// DELETE /api/v1/movies/{id}: delete a movie (admin).
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    movie_service::delete(&state.db, id).await?;
    Ok(ApiResponse::success(()))
}
