//! Entity models and DTOs.
//!
//! Row structs derive `sqlx::FromRow`; enum-typed columns are TEXT in
//! Postgres and convert through `#[sqlx(try_from = "String")]`.

pub mod activity;
pub mod comment;
pub mod feature;
pub mod file;
pub mod invoice;
pub mod project;
pub mod task;
pub mod user;
