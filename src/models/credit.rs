//! Cast and crew assignments linking people to movies.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Billing order accepted for cast entries.
pub const MIN_CAST_ORDER: i32 = 1;
pub const MAX_CAST_ORDER: i32 = 100;

/// Actor credited on a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CastMember {
    pub person_id: i32,
    pub actor_name: String,
    pub character_name: String,
    pub cast_order: i32,
}

/// Crew member credited on a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CrewMember {
    pub person_id: i32,
    pub person_name: String,
    pub role: String,
}

/// Full credit listing for one movie.
#[derive(Debug, Clone, Serialize)]
pub struct MovieCredits {
    pub movie_id: i32,
    pub movie_title: String,
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCast {
    pub person_id: i32,
    #[validate(
        length(min = 1, max = 150, message = "Character name must be between 1 and 150 characters"),
        custom(function = "crate::validation::not_blank")
    )]
    pub character_name: String,
    #[validate(range(min = 1, max = 100, message = "Billing order must be between 1 and 100"))]
    pub cast_order: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCast {
    #[validate(
        length(min = 1, max = 150, message = "Character name must be between 1 and 150 characters"),
        custom(function = "crate::validation::not_blank")
    )]
    pub character_name: String,
    #[validate(range(min = 1, max = 100, message = "Billing order must be between 1 and 100"))]
    pub cast_order: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCrew {
    pub person_id: i32,
    #[validate(
        length(min = 1, max = 50, message = "Role must be between 1 and 50 characters"),
        custom(function = "crate::validation::not_blank")
    )]
    pub role: String,
}
