//! Business logic services.

pub mod auth;
pub mod cart;
pub mod credit;
pub mod genre;
pub mod movie;
pub mod movie_query;
pub mod person;
