//! Feature entity model and DTOs.

use atelier_core::status::{FeaturePriority, FeatureStatus};
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A feature row from the `features` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feature {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: FeatureStatus,
    #[sqlx(try_from = "String")]
    pub priority: FeaturePriority,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a feature. Status always starts at `Todo`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeature {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<FeaturePriority>,
}

/// DTO for updating a feature. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFeature {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<FeatureStatus>,
    pub priority: Option<FeaturePriority>,
}

/// Feature totals for stats endpoints, grouped by status.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeatureCounts {
    pub total: i64,
    pub completed: i64,
    pub in_progress: i64,
    pub todo: i64,
}
