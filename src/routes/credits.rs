//! Cast and crew routes nested under a movie.

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireAdmin;
use crate::models::credit::{CreateCast, CreateCrew, MovieCredits, UpdateCast};
use crate::services::credit as credit_service;
use crate::AppState;

/// GET /api/v1/movies/{id}/credits
pub async fn list(
    State(state): State<AppState>,
    Path(movie_id): Path<i32>,
) -> Result<Json<ApiResponse<MovieCredits>>, AppError> {
    let credits = credit_service::list(&state.db, movie_id).await?;
    Ok(ApiResponse::success(credits))
}

/// POST /api/v1/movies/{id}/cast (admin)
pub async fn add_cast(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(movie_id): Path<i32>,
    Json(body): Json<CreateCast>,
) -> Result<Json<ApiResponse<MovieCredits>>, AppError> {
    body.validate()?;
    let credits = credit_service::add_cast(&state.db, movie_id, &body).await?;
    Ok(ApiResponse::success(credits))
}

/// PUT /api/v1/movies/{id}/cast/{person_id} (admin)
pub async fn update_cast(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((movie_id, person_id)): Path<(i32, i32)>,
    Json(body): Json<UpdateCast>,
) -> Result<Json<ApiResponse<MovieCredits>>, AppError> {
    body.validate()?;
    let credits = credit_service::update_cast(&state.db, movie_id, person_id, &body).await?;
    Ok(ApiResponse::success(credits))
}

/// DELETE /api/v1/movies/{id}/cast/{person_id} (admin)
pub async fn remove_cast(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((movie_id, person_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    credit_service::remove_cast(&state.db, movie_id, person_id).await?;
    Ok(ApiResponse::success(()))
}

/// POST /api/v1/movies/{id}/crew (admin)
pub async fn add_crew(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(movie_id): Path<i32>,
    Json(body): Json<CreateCrew>,
) -> Result<Json<ApiResponse<MovieCredits>>, AppError> {
    body.validate()?;
    let credits = credit_service::add_crew(&state.db, movie_id, &body).await?;
    Ok(ApiResponse::success(credits))
}

/// DELETE /api/v1/movies/{id}/crew/{person_id}/{role} (admin)
pub async fn remove_crew(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path((movie_id, person_id, role)): Path<(i32, i32, String)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    credit_service::remove_crew(&state.db, movie_id, person_id, &role).await?;
    Ok(ApiResponse::success(()))
}
