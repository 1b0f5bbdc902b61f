//! Domain core for the Atelier client portal.
//!
//! Pure types and logic with no I/O: role and status enums, the per-request
//! access-control evaluator, activity-record kinds with baked descriptions,
//! and the unreplied-comment detector. Persistence and HTTP layers live in
//! `atelier-db` and `atelier-api`.

pub mod access;
pub mod activity;
pub mod attention;
pub mod error;
pub mod roles;
pub mod status;
pub mod types;
