//! People service: paginated listing, details and CRUD.

use std::future::Future;

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::errors::AppError;
use crate::models::pagination::{paginate, Page, PageSource, Pagination};
use crate::models::person::{
    ActingRole, CrewRole, Person, PersonDetails, PersonFilters, PersonInput, PersonSummary,
};
use crate::services::movie_query::escape_like;

/// People listing, optionally narrowed by a case-insensitive name search.
pub struct PeopleSearch<'a> {
    pub pool: &'a PgPool,
    pub name: Option<&'a str>,
}

impl PeopleSearch<'_> {
    fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(name) = self.name {
            qb.push(" WHERE p.full_name ILIKE ")
                .push_bind(format!("%{}%", escape_like(name)));
        }
    }

    fn count_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM people p");
        self.push_where(&mut qb);
        qb
    }

    fn slice_query(&self, offset: i64, limit: i64) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(
            "SELECT p.id, p.full_name, p.birth_date, \
             ((SELECT COUNT(DISTINCT movie_id) FROM movie_cast WHERE person_id = p.id) + \
              (SELECT COUNT(DISTINCT movie_id) FROM movie_crew WHERE person_id = p.id)) AS movie_count \
             FROM people p",
        );
        self.push_where(&mut qb);
        qb.push(" ORDER BY p.full_name ASC, p.id ASC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        qb
    }
}

impl PageSource for PeopleSearch<'_> {
    type Item = PersonSummary;

    fn count(&self) -> impl Future<Output = Result<i64, AppError>> + Send {
        async move {
            let total = self
                .count_query()
                .build_query_scalar::<i64>()
                .fetch_one(self.pool)
                .await?;
            Ok(total)
        }
    }

    fn slice(
        &self,
        offset: i64,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<PersonSummary>, AppError>> + Send {
        async move {
            let items = self
                .slice_query(offset, limit)
                .build_query_as::<PersonSummary>()
                .fetch_all(self.pool)
                .await?;
            Ok(items)
        }
    }
}

pub async fn list(
    pool: &PgPool,
    filters: &PersonFilters,
    pagination: &Pagination,
) -> Result<Page<PersonSummary>, AppError> {
    let source = PeopleSearch {
        pool,
        name: filters.search_term(),
    };
    paginate(&source, pagination.page_index(), pagination.page_size()).await
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Person, AppError> {
    sqlx::query_as::<_, Person>("SELECT id, full_name, birth_date, bio FROM people WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Person {id} not found")))
}

pub async fn find_details(pool: &PgPool, id: i32) -> Result<PersonDetails, AppError> {
    let person = find_by_id(pool, id).await?;

    let movies_as_actor = sqlx::query_as::<_, ActingRole>(
        r#"
        SELECT m.id AS movie_id, m.title AS movie_title, m.release_year, mc.character_name
        FROM movie_cast mc
        JOIN movies m ON m.id = mc.movie_id
        WHERE mc.person_id = $1
        ORDER BY m.release_year DESC, m.title ASC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let movies_as_crew = sqlx::query_as::<_, CrewRole>(
        r#"
        SELECT m.id AS movie_id, m.title AS movie_title, m.release_year, mc.role
        FROM movie_crew mc
        JOIN movies m ON m.id = mc.movie_id
        WHERE mc.person_id = $1
        ORDER BY m.release_year DESC, m.title ASC, mc.role ASC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(PersonDetails {
        person,
        movies_as_actor,
        movies_as_crew,
    })
}

pub async fn create(pool: &PgPool, input: &PersonInput) -> Result<Person, AppError> {
    let person = sqlx::query_as::<_, Person>(
        r#"
        INSERT INTO people (full_name, birth_date, bio)
        VALUES ($1, $2, $3)
        RETURNING id, full_name, birth_date, bio
        "#,
    )
    .bind(input.full_name.trim())
    .bind(input.birth_date)
    .bind(&input.bio)
    .fetch_one(pool)
    .await?;

    tracing::info!(person_id = person.id, "Person created");
    Ok(person)
}

pub async fn update(pool: &PgPool, id: i32, input: &PersonInput) -> Result<Person, AppError> {
    let person = sqlx::query_as::<_, Person>(
        r#"
        UPDATE people SET full_name = $2, birth_date = $3, bio = $4
        WHERE id = $1
        RETURNING id, full_name, birth_date, bio
        "#,
    )
    .bind(id)
    .bind(input.full_name.trim())
    .bind(input.birth_date)
    .bind(&input.bio)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Person {id} not found")))?;

    tracing::info!(person_id = id, "Person updated");
    Ok(person)
}

/// Delete a person with no cast or crew credits.
pub async fn delete(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let credited = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(SELECT 1 FROM movie_cast WHERE person_id = $1)
            OR EXISTS(SELECT 1 FROM movie_crew WHERE person_id = $1)
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    if credited {
        return Err(AppError::Conflict(
            "Person is credited on one or more movies and cannot be deleted".to_string(),
        ));
    }

    let result = sqlx::query("DELETE FROM people WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Person {id} not found")));
    }
    tracing::info!(person_id = id, "Person deleted");
    Ok(())
}
