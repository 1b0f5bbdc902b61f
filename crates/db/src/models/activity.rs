//! Activity record models (append-only audit trail).
//!
//! Activity rows are immutable: no update DTO exists and no repository
//! method mutates or deletes them. `description` is the final rendered
//! text; `metadata` carries the structured old/new values.

use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An activity row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityRecord {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub activity_type: String,
    pub description: String,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
}

/// An activity joined with actor and project context, for feeds and export.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityWithContext {
    pub id: DbId,
    pub project_id: DbId,
    pub activity_type: String,
    pub description: String,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
    pub user_name: String,
    pub user_email: String,
    pub project_title: String,
}

/// DTO for appending one activity record.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub project_id: DbId,
    pub user_id: DbId,
    pub activity_type: &'static str,
    pub description: String,
    pub metadata: serde_json::Value,
}
