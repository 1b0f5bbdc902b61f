//! Stats and dashboard aggregate handlers.
//!
//! Aggregates fan out their independent read-only queries concurrently
//! and fail the whole request on any sub-query failure; a dashboard with
//! silently missing panels is worse than an error.

use std::collections::HashMap;

use atelier_core::access::{can_access, Action};
use atelier_core::activity::{display_tag, feed_description};
use atelier_core::attention::{count_projects_needing_reply, ThreadComment};
use atelier_core::error::CoreError;
use atelier_core::types::{DbId, Timestamp};
use atelier_db::models::activity::ActivityWithContext;
use atelier_db::models::comment::CommentWithAuthor;
use atelier_db::models::feature::FeatureCounts;
use atelier_db::repositories::{ActivityRepo, CommentRepo, FeatureRepo, ProjectRepo};
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// How many recent comments a project stats view shows.
const RECENT_COMMENTS: i64 = 5;
/// How many recent activities feed views show.
const RECENT_ACTIVITIES: i64 = 10;

/// An activity entry shaped for feed display.
#[derive(Debug, Serialize)]
pub struct ActivityFeedEntry {
    pub id: DbId,
    pub project_id: DbId,
    /// Lowercase display form of the stored tag.
    pub activity_type: String,
    pub description: String,
    pub metadata: serde_json::Value,
    pub user_name: String,
    pub created_at: Timestamp,
}

/// Response body for `GET /projects/{id}/stats`.
#[derive(Debug, Serialize)]
pub struct ProjectStats {
    pub feature_counts: FeatureCounts,
    pub recent_comments: Vec<CommentWithAuthor>,
    pub recent_activities: Vec<ActivityFeedEntry>,
}

/// Response body for `GET /dashboard/admin-stats`.
#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_projects: i64,
    /// Projects past the CONCEPT stage.
    pub active_projects: i64,
    pub feature_counts: FeatureCounts,
    /// Projects whose latest conversational turn is waiting on the agency.
    pub projects_needing_reply: usize,
    pub recent_activities: Vec<ActivityFeedEntry>,
}

/// GET /api/v1/projects/{id}/stats
pub async fn project_stats(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectStats>>> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("project", project_id)))?;

    let action = Action::ViewProject {
        project_client_id: project.client_id,
    };
    if !can_access(&auth_user.actor(), &action) {
        return Err(AppError::Core(CoreError::forbidden(
            "You do not have access to this project",
        )));
    }

    let (feature_counts, recent_comments, activities) = tokio::try_join!(
        FeatureRepo::counts_for_project(&state.pool, project_id),
        CommentRepo::list_recent_for_project(&state.pool, project_id, RECENT_COMMENTS),
        ActivityRepo::list_recent_for_project(&state.pool, project_id, RECENT_ACTIVITIES),
    )?;

    // Single-project view: no project-title prefix on descriptions.
    let recent_activities = activities
        .into_iter()
        .map(|row| feed_entry(row, false))
        .collect();

    Ok(Json(DataResponse::new(ProjectStats {
        feature_counts,
        recent_comments,
        recent_activities,
    })))
}

/// GET /api/v1/dashboard/admin-stats (admin)
pub async fn admin_stats(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Json<DataResponse<AdminStats>>> {
    let (total_projects, active_projects, feature_counts, detector_rows, activities) = tokio::try_join!(
        ProjectRepo::count_all(&state.pool),
        ProjectRepo::count_active(&state.pool),
        FeatureRepo::counts_all(&state.pool),
        CommentRepo::list_all_for_detection(&state.pool),
        ActivityRepo::list_recent_all(&state.pool, RECENT_ACTIVITIES),
    )?;

    let mut by_project: HashMap<DbId, Vec<ThreadComment>> = HashMap::new();
    for row in detector_rows {
        by_project
            .entry(row.project_id)
            .or_default()
            .push(row.into());
    }
    let projects_needing_reply = count_projects_needing_reply(
        by_project.values().map(Vec::as_slice),
        admin.user_id,
    );

    // Cross-project feed: descriptions carry the project-title prefix.
    let recent_activities = activities
        .into_iter()
        .map(|row| feed_entry(row, true))
        .collect();

    Ok(Json(DataResponse::new(AdminStats {
        total_projects,
        active_projects,
        feature_counts,
        projects_needing_reply,
        recent_activities,
    })))
}

/// Shape one joined activity row for feed display.
fn feed_entry(row: ActivityWithContext, with_project_prefix: bool) -> ActivityFeedEntry {
    let project_title = with_project_prefix.then_some(row.project_title.as_str());
    let description = feed_description(&row.activity_type, &row.description, project_title);
    ActivityFeedEntry {
        id: row.id,
        project_id: row.project_id,
        activity_type: display_tag(&row.activity_type),
        description,
        metadata: row.metadata,
        user_name: row.user_name,
        created_at: row.created_at,
    }
}
