//! Domain error taxonomy.
//!
//! Handlers map these onto HTTP statuses in `atelier-api`. The ordering of
//! concerns matters for callers: an unauthenticated request is reported
//! differently from an authenticated-but-forbidden one, which is reported
//! differently from a missing resource.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The addressed resource does not exist (HTTP 404).
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or rejected input (HTTP 400).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A uniqueness or state conflict, e.g. duplicate email (HTTP 409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credential (HTTP 401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed (HTTP 403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unexpected failure; message is for logs, never for clients (HTTP 500).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound { entity, id }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        CoreError::Forbidden(msg.into())
    }
}
