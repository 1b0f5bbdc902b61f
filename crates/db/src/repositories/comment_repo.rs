//! Repository for the `comments` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentWithAuthor, CreateComment, DetectorComment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, author_id, content, parent_id, created_at";

/// Author-joined column list for list responses.
const AUTHOR_COLUMNS: &str = "c.id, c.content, c.author_id, u.name AS author_name, \
     u.role AS author_role, u.email AS author_email, c.parent_id, c.created_at";

/// Provides operations for project comments.
pub struct CommentRepo;

impl CommentRepo {
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (project_id, author_id, content, parent_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.project_id)
            .bind(input.author_id)
            .bind(&input.content)
            .bind(input.parent_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's comments with author info, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {AUTHOR_COLUMNS} FROM comments c
             JOIN users u ON u.id = c.author_id
             WHERE c.project_id = $1
             ORDER BY c.created_at DESC"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// The most recent comments of a project, for stats views.
    pub async fn list_recent_for_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {AUTHOR_COLUMNS} FROM comments c
             JOIN users u ON u.id = c.author_id
             WHERE c.project_id = $1
             ORDER BY c.created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(project_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Every comment of every project, in the detector's reduced shape.
    pub async fn list_all_for_detection(
        pool: &PgPool,
    ) -> Result<Vec<DetectorComment>, sqlx::Error> {
        sqlx::query_as::<_, DetectorComment>(
            "SELECT project_id, id, author_id, parent_id, created_at FROM comments",
        )
        .fetch_all(pool)
        .await
    }

    /// Delete a comment by ID. Replies cascade at the schema level.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
