//! Movie search query composition.
//!
//! [`MovieQuery::build`] turns [`SearchCriteria`] into a list of filters
//! (AND-combined) plus one ordering. The same description renders to SQL
//! through [`MovieSearch`] or evaluates in memory against [`CatalogRecord`]s.

use std::cmp::Ordering;
use std::future::Future;

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::errors::AppError;
use crate::models::movie::{CatalogRecord, MovieSummary};
use crate::models::pagination::PageSource;
use crate::models::search::{SearchCriteria, SortDirection, SortField};

/// One search filter.
#[derive(Debug, Clone, PartialEq)]
pub enum MovieFilter {
    /// Lowercased substring of title, original title or synopsis.
    Term(String),
    Genre(i32),
    YearFrom(i32),
    YearTo(i32),
    PriceFrom(Decimal),
    PriceTo(Decimal),
}

impl MovieFilter {
    pub fn matches(&self, record: &CatalogRecord) -> bool {
        match self {
            Self::Term(term) => {
                let contains = |field: Option<&str>| {
                    field.is_some_and(|value| value.to_lowercase().contains(term.as_str()))
                };
                contains(Some(&record.title))
                    || contains(record.original_title.as_deref())
                    || contains(record.synopsis.as_deref())
            }
            Self::Genre(id) => record.genre_ids.contains(id),
            Self::YearFrom(year) => record.release_year >= *year,
            Self::YearTo(year) => record.release_year <= *year,
            Self::PriceFrom(price) => record.rental_price >= *price,
            Self::PriceTo(price) => record.rental_price <= *price,
        }
    }

    fn push_sql(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Self::Term(term) => {
                let pattern = format!("%{}%", escape_like(term));
                qb.push("(LOWER(m.title) LIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR LOWER(m.original_title) LIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR LOWER(m.synopsis) LIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
            Self::Genre(id) => {
                qb.push(
                    "EXISTS (SELECT 1 FROM movie_genres mg \
                     WHERE mg.movie_id = m.id AND mg.genre_id = ",
                )
                .push_bind(*id)
                .push(")");
            }
            Self::YearFrom(year) => {
                qb.push("m.release_year >= ").push_bind(*year);
            }
            Self::YearTo(year) => {
                qb.push("m.release_year <= ").push_bind(*year);
            }
            Self::PriceFrom(price) => {
                qb.push("m.rental_price >= ").push_bind(*price);
            }
            Self::PriceTo(price) => {
                qb.push("m.rental_price <= ").push_bind(*price);
            }
        }
    }
}

/// Escape LIKE wildcards so the term matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Resolved sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MovieOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for MovieOrder {
    fn default() -> Self {
        Self {
            field: SortField::Created,
            direction: SortDirection::Desc,
        }
    }
}

impl MovieOrder {
    /// Pick the direction for a field when the client may not have given one.
    ///
    /// Year and created default to descending, the other fields to
    /// ascending. Without a recognized field the order is newest first,
    /// whatever direction was asked for.
    pub fn resolve(field: Option<SortField>, direction: Option<SortDirection>) -> Self {
        use SortDirection::{Asc, Desc};

        let Some(field) = field else {
            return Self::default();
        };

        let direction = match (field, direction) {
            (SortField::Title | SortField::Price | SortField::Duration, Some(Desc)) => Desc,
            (SortField::Title | SortField::Price | SortField::Duration, _) => Asc,
            (SortField::Year | SortField::Created, Some(Asc)) => Asc,
            (SortField::Year | SortField::Created, _) => Desc,
        };

        Self { field, direction }
    }

    fn column(&self) -> &'static str {
        match self.field {
            SortField::Title => "m.title",
            SortField::Year => "m.release_year",
            SortField::Price => "m.rental_price",
            SortField::Duration => "m.duration_minutes",
            SortField::Created => "m.created_at",
        }
    }

    /// ORDER BY body; id breaks ties so paging is stable.
    pub fn sql(&self) -> String {
        let direction = match self.direction {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };
        format!("{} {direction}, m.id {direction}", self.column())
    }

    pub fn compare(&self, a: &CatalogRecord, b: &CatalogRecord) -> Ordering {
        let ordering = match self.field {
            SortField::Title => a.title.cmp(&b.title),
            SortField::Year => a.release_year.cmp(&b.release_year),
            SortField::Price => a.rental_price.cmp(&b.rental_price),
            SortField::Duration => a.duration_minutes.cmp(&b.duration_minutes),
            SortField::Created => a.created_at.cmp(&b.created_at),
        }
        .then_with(|| a.id.cmp(&b.id));

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Filtered, ordered, not yet paginated movie query.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieQuery {
    pub filters: Vec<MovieFilter>,
    pub order: MovieOrder,
}

impl MovieQuery {
    pub fn build(criteria: &SearchCriteria) -> Self {
        let mut filters = Vec::new();

        if let Some(term) = criteria.search_term.as_deref() {
            if !term.trim().is_empty() {
                filters.push(MovieFilter::Term(term.to_lowercase()));
            }
        }
        if let Some(genre_id) = criteria.genre_id {
            filters.push(MovieFilter::Genre(genre_id));
        }
        if let Some(year) = criteria.year_from {
            filters.push(MovieFilter::YearFrom(year));
        }
        if let Some(year) = criteria.year_to {
            filters.push(MovieFilter::YearTo(year));
        }
        if let Some(price) = criteria.price_from {
            filters.push(MovieFilter::PriceFrom(price));
        }
        if let Some(price) = criteria.price_to {
            filters.push(MovieFilter::PriceTo(price));
        }

        Self {
            filters,
            order: MovieOrder::resolve(criteria.sort_field, criteria.sort_direction),
        }
    }

    pub fn matches(&self, record: &CatalogRecord) -> bool {
        self.filters.iter().all(|filter| filter.matches(record))
    }

    /// Filter and sort records in memory.
    pub fn apply(&self, records: &[CatalogRecord]) -> Vec<CatalogRecord> {
        let mut matched: Vec<CatalogRecord> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        matched.sort_by(|a, b| self.order.compare(a, b));
        matched
    }

    fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        for (i, filter) in self.filters.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            filter.push_sql(qb);
        }
    }

    pub fn count_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM movies m");
        self.push_where(&mut qb);
        qb
    }

    pub fn slice_query(&self, offset: i64, limit: i64) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(
            "SELECT m.id, m.title, m.release_year, m.duration_minutes, m.rental_price, \
             COALESCE((SELECT array_agg(g.name::text ORDER BY g.name) \
                       FROM movie_genres mg JOIN genres g ON g.id = mg.genre_id \
                       WHERE mg.movie_id = m.id), ARRAY[]::text[]) AS genres \
             FROM movies m",
        );
        self.push_where(&mut qb);
        qb.push(" ORDER BY ")
            .push(self.order.sql())
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
        qb
    }
}

/// Movie search executed against Postgres.
pub struct MovieSearch<'a> {
    pub pool: &'a PgPool,
    pub query: &'a MovieQuery,
}

impl PageSource for MovieSearch<'_> {
    type Item = MovieSummary;

    fn count(&self) -> impl Future<Output = Result<i64, AppError>> + Send {
        async move {
            let total = self
                .query
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
    ) -> impl Future<Output = Result<Vec<MovieSummary>, AppError>> + Send {
        async move {
            let items = self
                .query
                .slice_query(offset, limit)
                .build_query_as::<MovieSummary>()
                .fetch_all(self.pool)
                .await?;
            Ok(items)
        }
    }
}
