//! Handlers for project features. The whole surface is admin-only.

use atelier_core::activity::ActivityKind;
use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::feature::{CreateFeature, Feature, UpdateFeature};
use atelier_db::repositories::{FeatureRepo, ProjectRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::actor_name;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/features (admin)
///
/// New features start at TODO; priority defaults to MEDIUM.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateFeature>,
) -> AppResult<(StatusCode, Json<DataResponse<Feature>>)> {
    ensure_project_exists(&state, project_id).await?;

    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::validation("Title is required")));
    }

    let feature = FeatureRepo::create(&state.pool, project_id, &input).await?;

    let name = actor_name(&state.pool, admin.user_id).await?;
    state.recorder.record(
        project_id,
        admin.user_id,
        &name,
        ActivityKind::FeatureAdded {
            feature_id: feature.id,
            title: feature.title.clone(),
            priority: feature.priority,
        },
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(feature))))
}

/// PUT /api/v1/projects/{id}/features/{feature_id} (admin)
///
/// Partial update. Only a status change is recorded; edits to title,
/// description, or priority pass silently.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((project_id, feature_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateFeature>,
) -> AppResult<Json<DataResponse<Feature>>> {
    ensure_project_exists(&state, project_id).await?;
    let before = find_feature_in_project(&state, project_id, feature_id).await?;

    if let Some(title) = &input.title {
        if title.trim().is_empty() {
            return Err(AppError::Core(CoreError::validation(
                "Title cannot be empty",
            )));
        }
    }

    let after = FeatureRepo::update(&state.pool, feature_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("feature", feature_id)))?;

    if before.status != after.status {
        let name = actor_name(&state.pool, admin.user_id).await?;
        state.recorder.record(
            project_id,
            admin.user_id,
            &name,
            ActivityKind::FeatureUpdated {
                feature_id: after.id,
                feature_title: after.title.clone(),
                old_status: before.status,
                new_status: after.status,
            },
        );
    }

    Ok(Json(DataResponse::new(after)))
}

/// DELETE /api/v1/projects/{id}/features/{feature_id} (admin)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((project_id, feature_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_project_exists(&state, project_id).await?;
    let feature = find_feature_in_project(&state, project_id, feature_id).await?;

    FeatureRepo::delete(&state.pool, feature_id).await?;

    let name = actor_name(&state.pool, admin.user_id).await?;
    state.recorder.record(
        project_id,
        admin.user_id,
        &name,
        ActivityKind::FeatureDeleted {
            feature_id,
            title: feature.title,
        },
    );

    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_project_exists(state: &AppState, project_id: DbId) -> AppResult<()> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("project", project_id)))?;
    Ok(())
}

async fn find_feature_in_project(
    state: &AppState,
    project_id: DbId,
    feature_id: DbId,
) -> AppResult<Feature> {
    FeatureRepo::find_by_id(&state.pool, feature_id)
        .await?
        .filter(|feature| feature.project_id == project_id)
        .ok_or_else(|| AppError::Core(CoreError::not_found("feature", feature_id)))
}
