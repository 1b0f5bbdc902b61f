//! Project entity model and DTOs.

use atelier_core::status::ProjectStatus;
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub client_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub contact_person: Option<String>,
    pub staging_url: Option<String>,
    pub timeline: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
    pub client_id: DbId,
    pub contact_person: Option<String>,
    pub staging_url: Option<String>,
    pub timeline: Option<String>,
}

/// DTO for updating a project. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub client_id: Option<DbId>,
    pub status: Option<ProjectStatus>,
    pub contact_person: Option<String>,
    pub staging_url: Option<String>,
    pub timeline: Option<String>,
}
