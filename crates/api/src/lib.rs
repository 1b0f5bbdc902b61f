//! Atelier API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! activity recorder) so integration tests and the binary entrypoint can
//! both access them.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod files;
pub mod handlers;
pub mod mailer;
pub mod middleware;
pub mod recorder;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
