//! Movie catalog service: search, details and CRUD.

use serde::Serialize;
use sqlx::{PgPool, Postgres, Transaction};

use crate::errors::AppError;
use crate::models::genre::Genre;
use crate::models::movie::{Movie, MovieDetails, MovieInput, MovieSummary};
use crate::models::pagination::{paginate, Page, ALLOWED_PAGE_SIZES, DEFAULT_PAGE_WINDOW};
use crate::models::search::{SearchCriteria, SortDirection, SortField};
use crate::services::credit as credit_service;
use crate::services::genre as genre_service;
use crate::services::movie_query::{MovieOrder, MovieQuery, MovieSearch};

const DUPLICATE_MOVIE: &str = "A movie with this title and release year already exists";

/// One page of search results together with the criteria that produced it.
#[derive(Debug, Serialize)]
pub struct MovieSearchResult {
    pub criteria: SearchCriteria,
    pub order: MovieOrder,
    pub has_active_filters: bool,
    pub movies: Page<MovieSummary>,
    pub page_numbers: Vec<i64>,
}

/// Value/label pair for a picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Everything a search form needs to render its controls.
#[derive(Debug, Serialize)]
pub struct SearchOptions {
    pub sort_options: Vec<SelectOption>,
    pub order_options: Vec<SelectOption>,
    pub page_sizes: Vec<i64>,
    pub genres: Vec<Genre>,
}

pub async fn search(pool: &PgPool, criteria: SearchCriteria) -> Result<MovieSearchResult, AppError> {
    let query = MovieQuery::build(&criteria);
    let source = MovieSearch {
        pool,
        query: &query,
    };
    let movies = paginate(&source, criteria.page_index, criteria.page_size).await?;

    tracing::debug!(
        filters = query.filters.len(),
        total = movies.meta.total_count,
        page = movies.meta.page_index,
        "Movie search"
    );

    Ok(MovieSearchResult {
        has_active_filters: criteria.has_active_filters(),
        order: query.order,
        page_numbers: movies.meta.page_numbers(DEFAULT_PAGE_WINDOW).collect(),
        movies,
        criteria: criteria.with_sort_defaults(),
    })
}

pub fn sort_options() -> Vec<SelectOption> {
    SortField::ALL
        .iter()
        .map(|f| SelectOption {
            value: f.as_str(),
            label: f.label(),
        })
        .collect()
}

pub fn order_options() -> Vec<SelectOption> {
    SortDirection::ALL
        .iter()
        .map(|d| SelectOption {
            value: d.as_str(),
            label: d.label(),
        })
        .collect()
}

pub async fn search_options(pool: &PgPool) -> Result<SearchOptions, AppError> {
    Ok(SearchOptions {
        sort_options: sort_options(),
        order_options: order_options(),
        page_sizes: ALLOWED_PAGE_SIZES.to_vec(),
        genres: genre_service::list_names(pool).await?,
    })
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Movie, AppError> {
    sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Movie {id} not found")))
}

async fn genre_names(pool: &PgPool, movie_id: i32) -> Result<Vec<String>, AppError> {
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT g.name FROM genres g
        JOIN movie_genres mg ON mg.genre_id = g.id
        WHERE mg.movie_id = $1
        ORDER BY g.name
        "#,
    )
    .bind(movie_id)
    .fetch_all(pool)
    .await?;
    Ok(names)
}

pub async fn find_details(pool: &PgPool, id: i32) -> Result<MovieDetails, AppError> {
    let movie = find_by_id(pool, id).await?;
    Ok(MovieDetails {
        genres: genre_names(pool, id).await?,
        cast: credit_service::cast_for_movie(pool, id).await?,
        crew: credit_service::crew_for_movie(pool, id).await?,
        movie,
    })
}

/// Fail with a validation error unless every id names an existing genre.
async fn ensure_genres_exist(
    tx: &mut Transaction<'_, Postgres>,
    genre_ids: &[i32],
) -> Result<(), AppError> {
    let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM genres WHERE id = ANY($1)")
        .bind(genre_ids)
        .fetch_one(&mut **tx)
        .await?;

    if found != genre_ids.len() as i64 {
        return Err(AppError::Validation(
            "One or more selected genres do not exist".to_string(),
        ));
    }
    Ok(())
}

async fn replace_genres(
    tx: &mut Transaction<'_, Postgres>,
    movie_id: i32,
    genre_ids: &[i32],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM movie_genres WHERE movie_id = $1")
        .bind(movie_id)
        .execute(&mut **tx)
        .await?;

    sqlx::query(
        "INSERT INTO movie_genres (movie_id, genre_id) SELECT $1, UNNEST($2::int[])",
    )
    .bind(movie_id)
    .bind(genre_ids)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn create(pool: &PgPool, input: &MovieInput) -> Result<MovieDetails, AppError> {
    let genre_ids = input.distinct_genre_ids();
    let mut tx = pool.begin().await?;
    ensure_genres_exist(&mut tx, &genre_ids).await?;

    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO movies (title, original_title, synopsis, release_year,
            duration_minutes, language, rental_price)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(input.title.trim())
    .bind(&input.original_title)
    .bind(&input.synopsis)
    .bind(input.release_year)
    .bind(input.duration_minutes)
    .bind(&input.language)
    .bind(input.rental_price)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_MOVIE))?;

    replace_genres(&mut tx, id, &genre_ids).await?;
    tx.commit().await?;

    tracing::info!(movie_id = id, title = %input.title, "Movie created");
    find_details(pool, id).await
}

pub async fn update(pool: &PgPool, id: i32, input: &MovieInput) -> Result<MovieDetails, AppError> {
    let genre_ids = input.distinct_genre_ids();
    let mut tx = pool.begin().await?;
    ensure_genres_exist(&mut tx, &genre_ids).await?;

    let result = sqlx::query(
        r#"
        UPDATE movies
        SET title = $2, original_title = $3, synopsis = $4, release_year = $5,
            duration_minutes = $6, language = $7, rental_price = $8
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(input.title.trim())
    .bind(&input.original_title)
    .bind(&input.synopsis)
    .bind(input.release_year)
    .bind(input.duration_minutes)
    .bind(&input.language)
    .bind(input.rental_price)
    .execute(&mut *tx)
    .await
    .map_err(|e| AppError::conflict_on_unique(e, DUPLICATE_MOVIE))?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Movie {id} not found")));
    }

    replace_genres(&mut tx, id, &genre_ids).await?;
    tx.commit().await?;

    tracing::info!(movie_id = id, "Movie updated");
    find_details(pool, id).await
}

/// Delete a movie; genre links, credits and cart entries go with it.
pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM movies WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Movie {id} not found")));
    }
    tracing::info!(movie_id = id, "Movie deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_options_cover_every_field() {
        let options = sort_options();
        let values: Vec<_> = options.iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["title", "year", "price", "duration", "created"]);
        assert_eq!(options[1].label, "Release Year");
        assert_eq!(options[4].label, "Date Added");
    }

    #[test]
    fn order_options_are_asc_then_desc() {
        assert_eq!(
            order_options(),
            vec![
                SelectOption {
                    value: "asc",
                    label: "Ascending"
                },
                SelectOption {
                    value: "desc",
                    label: "Descending"
                },
            ]
        );
    }

    #[test]
    fn order_serializes_as_names() {
        let json = serde_json::to_value(MovieOrder::default()).unwrap();
        assert_eq!(json["field"], "created");
        assert_eq!(json["direction"], "desc");
    }
}
