//! Admin activity-log export.

use atelier_core::activity::display_tag;
use atelier_core::error::CoreError;
use atelier_core::types::{DbId, Timestamp};
use atelier_db::repositories::ActivityRepo;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// The admin-action tags the export includes. Comment activity is client
/// conversation, not admin action, and stays out.
const ADMIN_ACTION_TYPES: &[&str] = &[
    "PROJECT_CREATED",
    "TITLE_CHANGED",
    "STATUS_CHANGED",
    "TIMELINE_UPDATED",
    "FEATURE_ADDED",
    "FEATURE_UPDATED",
    "FEATURE_DELETED",
];

/// Query parameters for `GET /admin/activity-log`.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One exported activity row.
#[derive(Debug, Serialize)]
pub struct ExportRow {
    pub id: DbId,
    pub created_at: Timestamp,
    pub user_name: String,
    pub user_email: String,
    pub project_title: String,
    pub activity_type: String,
    pub description: String,
    pub metadata: serde_json::Value,
}

/// GET /api/v1/admin/activity-log?start_date=...&end_date=... (admin)
///
/// Both dates are inclusive; the end date extends to end of day so a
/// single-day export covers that whole day.
pub async fn export(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ExportQuery>,
) -> AppResult<Json<DataResponse<Vec<ExportRow>>>> {
    if query.start_date > query.end_date {
        return Err(AppError::Core(CoreError::validation(
            "start_date must not be after end_date",
        )));
    }

    let from = day_start(query.start_date);
    let to = day_end(query.end_date);

    let rows = ActivityRepo::export_range(&state.pool, from, to, ADMIN_ACTION_TYPES).await?;

    let export: Vec<ExportRow> = rows
        .into_iter()
        .map(|row| ExportRow {
            id: row.id,
            created_at: row.created_at,
            user_name: row.user_name,
            user_email: row.user_email,
            project_title: row.project_title,
            activity_type: display_tag(&row.activity_type),
            description: row.description,
            metadata: row.metadata,
        })
        .collect();

    Ok(Json(DataResponse::new(export)))
}

fn day_start(date: NaiveDate) -> Timestamp {
    DateTime::from_naive_utc_and_offset(date.and_hms_opt(0, 0, 0).unwrap_or_default(), Utc)
}

fn day_end(date: NaiveDate) -> Timestamp {
    DateTime::from_naive_utc_and_offset(date.and_hms_opt(23, 59, 59).unwrap_or_default(), Utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_day_range_spans_the_whole_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let from = day_start(date);
        let to = day_end(date);

        assert_eq!(from.to_rfc3339(), "2025-03-14T00:00:00+00:00");
        assert_eq!(to.to_rfc3339(), "2025-03-14T23:59:59+00:00");
        assert!(from < to);
    }
}
