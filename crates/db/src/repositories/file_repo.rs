//! Repository for the `files` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::file::{CreateFile, FileWithUploader, ProjectFile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, uploaded_by, file_name, file_url, mime_type, created_at";

/// Provides operations for project file records.
pub struct FileRepo;

impl FileRepo {
    /// Record a stored file. The durable URL comes from the file store.
    pub async fn create(pool: &PgPool, input: &CreateFile) -> Result<ProjectFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO files (project_id, uploaded_by, file_name, file_url, mime_type)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectFile>(&query)
            .bind(input.project_id)
            .bind(input.uploaded_by)
            .bind(&input.file_name)
            .bind(&input.file_url)
            .bind(&input.mime_type)
            .fetch_one(pool)
            .await
    }

    /// List a project's files with uploader info, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<FileWithUploader>, sqlx::Error> {
        sqlx::query_as::<_, FileWithUploader>(
            "SELECT f.id, f.file_name, f.file_url, u.name AS uploader_name,
                    u.role AS uploader_role, f.created_at
             FROM files f
             JOIN users u ON u.id = f.uploaded_by
             WHERE f.project_id = $1
             ORDER BY f.created_at DESC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}
