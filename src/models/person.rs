//! People credited as cast or crew.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub id: i32,
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub bio: Option<String>,
}

/// People listing row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PersonSummary {
    pub id: i32,
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub movie_count: i64,
}

/// A movie the person acted in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActingRole {
    pub movie_id: i32,
    pub movie_title: String,
    pub release_year: i32,
    pub character_name: String,
}

/// A movie the person worked on behind the camera.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CrewRole {
    pub movie_id: i32,
    pub movie_title: String,
    pub release_year: i32,
    pub role: String,
}

/// Person with filmography, newest movies first.
#[derive(Debug, Clone, Serialize)]
pub struct PersonDetails {
    #[serde(flatten)]
    pub person: Person,
    pub movies_as_actor: Vec<ActingRole>,
    pub movies_as_crew: Vec<CrewRole>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PersonInput {
    #[validate(
        length(min = 1, max = 150, message = "Full name must be between 1 and 150 characters"),
        regex(
            path = *crate::validation::PERSON_NAME,
            message = "Name can only contain letters, spaces, periods, hyphens, and apostrophes"
        ),
        custom(function = "crate::validation::not_blank")
    )]
    pub full_name: String,
    #[validate(custom(function = "crate::validation::birth_date"))]
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 2000, message = "Biography cannot exceed 2000 characters"))]
    pub bio: Option<String>,
}

/// Filters for listing people.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonFilters {
    pub search: Option<String>,
}

impl PersonFilters {
    /// Search text, ignoring blank input.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
