//! Repository for the `features` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::feature::{CreateFeature, Feature, FeatureCounts, UpdateFeature};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, description, status, priority, created_at, updated_at";

/// Provides CRUD operations for features.
pub struct FeatureRepo;

impl FeatureRepo {
    /// Insert a new feature for a project. Status starts at TODO; priority
    /// defaults to MEDIUM when omitted.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateFeature,
    ) -> Result<Feature, sqlx::Error> {
        let query = format!(
            "INSERT INTO features (project_id, title, description, priority)
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, 'MEDIUM'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feature>(&query)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.priority.map(|p| p.as_str()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Feature>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM features WHERE id = $1");
        sqlx::query_as::<_, Feature>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's features: unfinished first, then by priority.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Feature>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM features WHERE project_id = $1
             ORDER BY status ASC, priority DESC, created_at DESC"
        );
        sqlx::query_as::<_, Feature>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a feature. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFeature,
    ) -> Result<Option<Feature>, sqlx::Error> {
        let query = format!(
            "UPDATE features SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                priority = COALESCE($5, priority),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feature>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.priority.map(|p| p.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a feature by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM features WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Per-status feature totals across all projects, in one round trip.
    pub async fn counts_all(pool: &PgPool) -> Result<FeatureCounts, sqlx::Error> {
        Self::counts_where(pool, None).await
    }

    /// Per-status feature totals for one project, in one round trip.
    pub async fn counts_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<FeatureCounts, sqlx::Error> {
        Self::counts_where(pool, Some(project_id)).await
    }

    async fn counts_where(
        pool: &PgPool,
        project_id: Option<DbId>,
    ) -> Result<FeatureCounts, sqlx::Error> {
        let row: (i64, i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*),
                    COUNT(*) FILTER (WHERE status = 'COMPLETED'),
                    COUNT(*) FILTER (WHERE status = 'IN_PROGRESS'),
                    COUNT(*) FILTER (WHERE status = 'TODO')
             FROM features
             WHERE $1::BIGINT IS NULL OR project_id = $1",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;

        Ok(FeatureCounts {
            total: row.0,
            completed: row.1,
            in_progress: row.2,
            todo: row.3,
        })
    }
}
