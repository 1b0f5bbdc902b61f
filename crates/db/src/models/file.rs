//! File entity model and DTOs.
//!
//! Only the durable URL returned by the object-store collaborator is
//! persisted, plus the original filename and mimetype.

use atelier_core::roles::Role;
use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A file row from the `files` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectFile {
    pub id: DbId,
    pub project_id: DbId,
    pub uploaded_by: DbId,
    pub file_name: String,
    pub file_url: String,
    pub mime_type: String,
    pub created_at: Timestamp,
}

/// A file joined with its uploader, for list responses.
#[derive(Debug, Clone, FromRow)]
pub struct FileWithUploader {
    pub id: DbId,
    pub file_name: String,
    pub file_url: String,
    pub uploader_name: String,
    #[sqlx(try_from = "String")]
    pub uploader_role: Role,
    pub created_at: Timestamp,
}

/// DTO for inserting a file record after a successful store upload.
#[derive(Debug, Clone)]
pub struct CreateFile {
    pub project_id: DbId,
    pub uploaded_by: DbId,
    pub file_name: String,
    pub file_url: String,
    pub mime_type: String,
}
