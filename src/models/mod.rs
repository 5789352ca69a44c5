//! Database models and DTOs for all domain entities.

pub mod cart;
pub mod credit;
pub mod genre;
pub mod movie;
pub mod pagination;
pub mod person;
pub mod search;
pub mod user;
