//! Genre service: listing and CRUD.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::genre::{Genre, GenreInput, GenreWithCount};

const DUPLICATE_GENRE: &str = "A genre with this name already exists";

/// All genres ordered by name, for pickers.
pub async fn list_names(pool: &PgPool) -> Result<Vec<Genre>, AppError> {
    let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name ASC")
        .fetch_all(pool)
        .await?;
    Ok(genres)
}

/// All genres ordered by name with their movie counts.
pub async fn list(pool: &PgPool) -> Result<Vec<GenreWithCount>, AppError> {
    let genres = sqlx::query_as::<_, GenreWithCount>(
        r#"
        SELECT g.id, g.name, COUNT(mg.movie_id) AS movie_count
        FROM genres g
        LEFT JOIN movie_genres mg ON mg.genre_id = g.id
        GROUP BY g.id, g.name
        ORDER BY g.name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(genres)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Genre, AppError> {
    sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Genre {id} not found")))
}

pub async fn create(pool: &PgPool, input: &GenreInput) -> Result<Genre, AppError> {
    let genre = sqlx::query_as::<_, Genre>("INSERT INTO genres (name) VALUES ($1) RETURNING id, name")
        .bind(input.trimmed_name())
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_GENRE))?;

    tracing::info!(genre_id = genre.id, name = %genre.name, "Genre created");
    Ok(genre)
}

pub async fn update(pool: &PgPool, id: i32, input: &GenreInput) -> Result<Genre, AppError> {
    let genre = sqlx::query_as::<_, Genre>(
        "UPDATE genres SET name = $2 WHERE id = $1 RETURNING id, name",
    )
    .bind(id)
    .bind(input.trimmed_name())
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_GENRE))?
    .ok_or_else(|| AppError::NotFound(format!("Genre {id} not found")))?;

    tracing::info!(genre_id = id, name = %genre.name, "Genre renamed");
    Ok(genre)
}

/// Delete a genre that no movie uses.
pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let in_use = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movie_genres WHERE genre_id = $1")
        .bind(id)
        .fetch_one(pool)
        .await?;

    if in_use > 0 {
        return Err(AppError::Conflict(format!(
            "Genre is assigned to {in_use} movie(s) and cannot be deleted"
        )));
    }

    let result = sqlx::query("DELETE FROM genres WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Genre {id} not found")));
    }
    tracing::info!(genre_id = id, "Genre deleted");
    Ok(())
}
