//! Movie catalog model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::credit::{CastMember, CrewMember};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub original_title: Option<String>,
    pub synopsis: Option<String>,
    pub release_year: i32,
    pub duration_minutes: i32,
    pub language: Option<String>,
    pub rental_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Search result row with genre names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MovieSummary {
    pub id: i32,
    pub title: String,
    pub release_year: i32,
    pub duration_minutes: i32,
    pub rental_price: Decimal,
    pub genres: Vec<String>,
}

/// Movie with genres and credits for detail views.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    pub genres: Vec<String>,
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

/// Create/update payload. Updates replace the whole genre set.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MovieInput {
    #[validate(
        length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"),
        custom(function = "crate::validation::required_plain_text")
    )]
    pub title: String,
    #[validate(length(max = 200, message = "Original title cannot exceed 200 characters"))]
    pub original_title: Option<String>,
    #[validate(
        length(max = 2000, message = "Synopsis cannot exceed 2000 characters"),
        custom(function = "crate::validation::no_html")
    )]
    pub synopsis: Option<String>,
    #[validate(custom(function = "crate::validation::release_year"))]
    pub release_year: i32,
    #[validate(range(min = 1, max = 600, message = "Duration must be between 1 and 600 minutes"))]
    pub duration_minutes: i32,
    #[validate(length(max = 50, message = "Language cannot exceed 50 characters"))]
    pub language: Option<String>,
    #[validate(custom(function = "crate::validation::rental_price"))]
    pub rental_price: Decimal,
    #[validate(custom(function = "crate::validation::genre_selection"))]
    pub genre_ids: Vec<i32>,
}

impl MovieInput {
    /// Genre ids with duplicates removed, in ascending order.
    pub fn distinct_genre_ids(&self) -> Vec<i32> {
        let mut ids = self.genre_ids.clone();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// The fields a catalog search reads from each movie.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub id: i32,
    pub title: String,
    pub original_title: Option<String>,
    pub synopsis: Option<String>,
    pub release_year: i32,
    pub duration_minutes: i32,
    pub rental_price: Decimal,
    pub genre_ids: Vec<i32>,
    pub created_at: DateTime<Utc>,
}
