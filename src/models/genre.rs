//! Genre model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Genre listing row with the number of movies tagged with it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GenreWithCount {
    pub id: i32,
    pub name: String,
    pub movie_count: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenreInput {
    #[validate(
        length(min = 1, max = 50, message = "Genre name must be between 1 and 50 characters"),
        regex(
            path = *crate::validation::GENRE_NAME,
            message = "Genre name can only contain letters, spaces, and hyphens"
        ),
        custom(function = "crate::validation::not_blank")
    )]
    pub name: String,
}

impl GenreInput {
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}
