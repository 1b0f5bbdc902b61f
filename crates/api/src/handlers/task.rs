//! Handlers for tasks: created by admins, fed back on by clients.

use atelier_core::access::{can_access, Action};
use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::task::{CreateTask, Task, UpdateTask};
use atelier_db::repositories::{ProjectRepo, TaskRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/tasks (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<DataResponse<Task>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::validation("Title is required")));
    }

    ProjectRepo::find_by_id(&state.pool, input.project_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("project", input.project_id)))?;

    let task = TaskRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(task))))
}

/// PUT /api/v1/tasks/{id}
///
/// Status and feedback updates. Clients may only touch tasks under their
/// own projects; task mutations leave no activity record.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<DataResponse<Task>>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("task", id)))?;

    let project = ProjectRepo::find_by_id(&state.pool, task.project_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("project", task.project_id)))?;

    let action = Action::UpdateTask {
        project_client_id: project.client_id,
    };
    if !can_access(&auth_user.actor(), &action) {
        return Err(AppError::Core(CoreError::forbidden(
            "You do not have access to this task",
        )));
    }

    if let Some(feedback) = &input.feedback {
        if feedback.trim().is_empty() {
            return Err(AppError::Core(CoreError::validation(
                "Feedback cannot be empty",
            )));
        }
    }

    let updated = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("task", id)))?;

    Ok(Json(DataResponse::new(updated)))
}
