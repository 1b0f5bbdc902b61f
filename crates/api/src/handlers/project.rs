//! Handlers for the `/projects` resource.

use atelier_core::access::{can_access, Action};
use atelier_core::activity::ActivityKind;
use atelier_core::error::CoreError;
use atelier_core::types::DbId;
use atelier_db::models::feature::Feature;
use atelier_db::models::invoice::Invoice;
use atelier_db::models::project::{CreateProject, Project, UpdateProject};
use atelier_db::models::task::Task;
use atelier_db::repositories::{
    CommentRepo, FeatureRepo, FileRepo, InvoiceRepo, ProjectRepo, TaskRepo, UserRepo,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::actor_name;
use crate::handlers::comment::{build_comment_tree, CommentNode};
use crate::handlers::file::FileView;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// A project with its child collections, as returned by list and detail
/// endpoints.
#[derive(Debug, Serialize)]
pub struct ProjectDetails {
    #[serde(flatten)]
    pub project: Project,
    pub features: Vec<Feature>,
    pub comments: Vec<CommentNode>,
    pub tasks: Vec<Task>,
    pub files: Vec<FileView>,
    pub invoices: Vec<Invoice>,
}

/// POST /api/v1/projects (admin)
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::validation("Title is required")));
    }

    // The client must exist up front; the FK would reject it anyway but
    // with an opaque 500.
    UserRepo::find_by_id(&state.pool, input.client_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::validation(
                "The referenced client account does not exist",
            ))
        })?;

    let project = ProjectRepo::create(&state.pool, &input).await?;

    let name = actor_name(&state.pool, admin.user_id).await?;
    state.recorder.record(
        project.id,
        admin.user_id,
        &name,
        ActivityKind::ProjectCreated {
            title: project.title.clone(),
        },
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(project))))
}

/// GET /api/v1/projects
///
/// Admins see every project; clients see only their own. Each entry
/// carries its child collections.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ProjectDetails>>>> {
    let projects = if auth_user.role.is_admin() {
        ProjectRepo::list_all(&state.pool).await?
    } else {
        ProjectRepo::list_for_client(&state.pool, auth_user.user_id).await?
    };

    let details = futures::future::try_join_all(
        projects
            .into_iter()
            .map(|project| assemble_details(&state, project)),
    )
    .await?;

    Ok(Json(DataResponse::new(details)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetails>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("project", id)))?;

    let action = Action::ViewProject {
        project_client_id: project.client_id,
    };
    if !can_access(&auth_user.actor(), &action) {
        return Err(AppError::Core(CoreError::forbidden(
            "You do not have access to this project",
        )));
    }

    let details = assemble_details(&state, project).await?;
    Ok(Json(DataResponse::new(details)))
}

/// PUT /api/v1/projects/{id} (admin)
///
/// Partial update. Title, status, and timeline changes each leave an
/// activity record, but only when the stored value actually changed.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    if let Some(title) = &input.title {
        if title.trim().is_empty() {
            return Err(AppError::Core(CoreError::validation(
                "Title cannot be empty",
            )));
        }
    }
    if let Some(client_id) = input.client_id {
        UserRepo::find_by_id(&state.pool, client_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::validation(
                    "The referenced client account does not exist",
                ))
            })?;
    }

    let before = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("project", id)))?;

    let after = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("project", id)))?;

    let name = actor_name(&state.pool, admin.user_id).await?;
    if before.title != after.title {
        state.recorder.record(
            id,
            admin.user_id,
            &name,
            ActivityKind::TitleChanged {
                old: before.title.clone(),
                new: after.title.clone(),
            },
        );
    }
    if before.status != after.status {
        state.recorder.record(
            id,
            admin.user_id,
            &name,
            ActivityKind::StatusChanged {
                old: before.status,
                new: after.status,
            },
        );
    }
    if before.timeline != after.timeline {
        state
            .recorder
            .record(id, admin.user_id, &name, ActivityKind::TimelineUpdated);
    }

    Ok(Json(DataResponse::new(after)))
}

/// DELETE /api/v1/projects/{id} (admin)
///
/// Child rows (features, comments, tasks, files, invoices, activities)
/// cascade at the schema level.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("project", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch all child collections of a project concurrently.
async fn assemble_details(state: &AppState, project: Project) -> AppResult<ProjectDetails> {
    let (features, comments, tasks, files, invoices) = tokio::try_join!(
        FeatureRepo::list_for_project(&state.pool, project.id),
        CommentRepo::list_for_project(&state.pool, project.id),
        TaskRepo::list_for_project(&state.pool, project.id),
        FileRepo::list_for_project(&state.pool, project.id),
        InvoiceRepo::list_for_project(&state.pool, project.id),
    )?;

    Ok(ProjectDetails {
        project,
        features,
        comments: build_comment_tree(comments),
        tasks,
        files: files.into_iter().map(FileView::from).collect(),
        invoices,
    })
}
