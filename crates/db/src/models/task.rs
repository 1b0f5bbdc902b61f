//! Task entity model and DTOs.

use atelier_core::status::TaskStatus;
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    pub feedback: Option<String>,
    pub is_client_task: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a task (admin).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub is_client_task: Option<bool>,
}

/// DTO for client task feedback. Either field may be omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub status: Option<TaskStatus>,
    pub feedback: Option<String>,
}
