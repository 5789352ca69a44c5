//! Cast and crew credits: listing and assignment.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::credit::{CastMember, CreateCast, CreateCrew, CrewMember, MovieCredits, UpdateCast};
use crate::services::movie as movie_service;

/// Cast of a movie in billing order.
pub async fn cast_for_movie(pool: &PgPool, movie_id: i32) -> Result<Vec<CastMember>, AppError> {
    let cast = sqlx::query_as::<_, CastMember>(
        r#"
        SELECT mc.person_id, p.full_name AS actor_name, mc.character_name, mc.cast_order
        FROM movie_cast mc
        JOIN people p ON p.id = mc.person_id
        WHERE mc.movie_id = $1
        ORDER BY mc.cast_order ASC, p.full_name ASC
        "#,
    )
    .bind(movie_id)
    .fetch_all(pool)
    .await?;
    Ok(cast)
}

/// Crew of a movie grouped by role.
pub async fn crew_for_movie(pool: &PgPool, movie_id: i32) -> Result<Vec<CrewMember>, AppError> {
    let crew = sqlx::query_as::<_, CrewMember>(
        r#"
        SELECT mc.person_id, p.full_name AS person_name, mc.role
        FROM movie_crew mc
        JOIN people p ON p.id = mc.person_id
        WHERE mc.movie_id = $1
        ORDER BY mc.role ASC, p.full_name ASC
        "#,
    )
    .bind(movie_id)
    .fetch_all(pool)
    .await?;
    Ok(crew)
}

pub async fn list(pool: &PgPool, movie_id: i32) -> Result<MovieCredits, AppError> {
    let movie = movie_service::find_by_id(pool, movie_id).await?;
    Ok(MovieCredits {
        movie_id: movie.id,
        movie_title: movie.title,
        cast: cast_for_movie(pool, movie_id).await?,
        crew: crew_for_movie(pool, movie_id).await?,
    })
}

async fn ensure_person_exists(pool: &PgPool, person_id: i32) -> Result<(), AppError> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM people WHERE id = $1)")
        .bind(person_id)
        .fetch_one(pool)
        .await?;
    if !exists {
        return Err(AppError::Validation(format!("Person {person_id} does not exist")));
    }
    Ok(())
}

pub async fn add_cast(
    pool: &PgPool,
    movie_id: i32,
    input: &CreateCast,
) -> Result<MovieCredits, AppError> {
    movie_service::find_by_id(pool, movie_id).await?;
    ensure_person_exists(pool, input.person_id).await?;

    sqlx::query(
        r#"
        INSERT INTO movie_cast (movie_id, person_id, character_name, cast_order)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(movie_id)
    .bind(input.person_id)
    .bind(input.character_name.trim())
    .bind(input.cast_order)
    .execute(pool)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, "This person is already in the cast"))?;

    tracing::info!(movie_id, person_id = input.person_id, "Cast member added");
    list(pool, movie_id).await
}

pub async fn update_cast(
    pool: &PgPool,
    movie_id: i32,
    person_id: i32,
    input: &UpdateCast,
) -> Result<MovieCredits, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE movie_cast SET character_name = $3, cast_order = $4
        WHERE movie_id = $1 AND person_id = $2
        "#,
    )
    .bind(movie_id)
    .bind(person_id)
    .bind(input.character_name.trim())
    .bind(input.cast_order)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Person {person_id} is not in the cast of movie {movie_id}"
        )));
    }

    list(pool, movie_id).await
}

pub async fn remove_cast(pool: &PgPool, movie_id: i32, person_id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM movie_cast WHERE movie_id = $1 AND person_id = $2")
        .bind(movie_id)
        .bind(person_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Person {person_id} is not in the cast of movie {movie_id}"
        )));
    }
    tracing::info!(movie_id, person_id, "Cast member removed");
    Ok(())
}

pub async fn add_crew(
    pool: &PgPool,
    movie_id: i32,
    input: &CreateCrew,
) -> Result<MovieCredits, AppError> {
    movie_service::find_by_id(pool, movie_id).await?;
    ensure_person_exists(pool, input.person_id).await?;

    sqlx::query("INSERT INTO movie_crew (movie_id, person_id, role) VALUES ($1, $2, $3)")
        .bind(movie_id)
        .bind(input.person_id)
        .bind(input.role.trim())
        .execute(pool)
        .await
        .map_err(|e| {
            AppError::conflict_on_unique(e, "This person already has that role on the movie")
        })?;

    tracing::info!(movie_id, person_id = input.person_id, role = %input.role, "Crew member added");
    list(pool, movie_id).await
}

pub async fn remove_crew(
    pool: &PgPool,
    movie_id: i32,
    person_id: i32,
    role: &str,
) -> Result<(), AppError> {
    let result =
        sqlx::query("DELETE FROM movie_crew WHERE movie_id = $1 AND person_id = $2 AND role = $3")
            .bind(movie_id)
            .bind(person_id)
            .bind(role)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Person {person_id} has no '{role}' credit on movie {movie_id}"
        )));
    }
    tracing::info!(movie_id, person_id, role, "Crew member removed");
    Ok(())
}
