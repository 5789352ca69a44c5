//! People routes: paginated listing, details and CRUD.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::rbac::RequireAdmin;
use crate::models::pagination::{Page, Pagination};
use crate::models::person::{Person, PersonDetails, PersonFilters, PersonInput, PersonSummary};
use crate::services::person as person_service;
use crate::AppState;

/// GET /api/v1/people: list people with optional name search.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<PersonFilters>,
) -> Result<Json<ApiResponse<Page<PersonSummary>>>, AppError> {
    let result = person_service::list(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/v1/people/{id}: person with filmography.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PersonDetails>>, AppError> {
    let person = person_service::find_details(&state.db, id).await?;
    Ok(ApiResponse::success(person))
}

/// POST /api/v1/people (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<PersonInput>,
) -> Result<Json<ApiResponse<Person>>, AppError> {
    body.validate()?;
    let person = person_service::create(&state.db, &body).await?;
    Ok(ApiResponse::success(person))
}

/// PUT /api/v1/people/{id} (admin)
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Json(body): Json<PersonInput>,
) -> Result<Json<ApiResponse<Person>>, AppError> {
    body.validate()?;
    let person = person_service::update(&state.db, id, &body).await?;
    Ok(ApiResponse::success(person))
}

/// DELETE /api/v1/people/{id} (admin): refused while credited.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    person_service::delete(&state.db, id).await?;
    Ok(ApiResponse::success(()))
}
