//! Repository for the `activities` table.
//!
//! Append-only: there are insert and read methods, nothing else. Display
//! ordering is always `created_at` descending.

use atelier_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::activity::{ActivityRecord, ActivityWithContext, NewActivity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_id, activity_type, description, metadata, created_at";

/// Context-joined column list for feeds and export.
const CONTEXT_COLUMNS: &str = "a.id, a.project_id, a.activity_type, a.description, a.metadata, \
     a.created_at, u.name AS user_name, u.email AS user_email, p.title AS project_title";

/// Provides append and read operations for activity records.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Append one activity record.
    pub async fn insert(pool: &PgPool, input: &NewActivity) -> Result<ActivityRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (project_id, user_id, activity_type, description, metadata)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityRecord>(&query)
            .bind(input.project_id)
            .bind(input.user_id)
            .bind(input.activity_type)
            .bind(&input.description)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    /// Most recent records for one project, with actor/project context.
    pub async fn list_recent_for_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActivityWithContext>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTEXT_COLUMNS} FROM activities a
             JOIN users u ON u.id = a.user_id
             JOIN projects p ON p.id = a.project_id
             WHERE a.project_id = $1
             ORDER BY a.created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ActivityWithContext>(&query)
            .bind(project_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Most recent records across all projects, with actor/project context.
    pub async fn list_recent_all(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<ActivityWithContext>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTEXT_COLUMNS} FROM activities a
             JOIN users u ON u.id = a.user_id
             JOIN projects p ON p.id = a.project_id
             ORDER BY a.created_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, ActivityWithContext>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Records within a date range restricted to the given type tags,
    /// newest first. Used by the admin export.
    pub async fn export_range(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
        types: &[&str],
    ) -> Result<Vec<ActivityWithContext>, sqlx::Error> {
        let type_list: Vec<String> = types.iter().map(|t| t.to_string()).collect();
        let query = format!(
            "SELECT {CONTEXT_COLUMNS} FROM activities a
             JOIN users u ON u.id = a.user_id
             JOIN projects p ON p.id = a.project_id
             WHERE a.created_at >= $1 AND a.created_at <= $2
               AND a.activity_type = ANY($3)
             ORDER BY a.created_at DESC"
        );
        sqlx::query_as::<_, ActivityWithContext>(&query)
            .bind(from)
            .bind(to)
            .bind(&type_list)
            .fetch_all(pool)
            .await
    }
}
