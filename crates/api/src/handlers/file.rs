//! Handlers for project file uploads and listings.

use atelier_core::access::{can_access, Action};
use atelier_core::error::CoreError;
use atelier_core::types::{DbId, Timestamp};
use atelier_db::models::file::{CreateFile, FileWithUploader, ProjectFile};
use atelier_db::repositories::{FileRepo, ProjectRepo};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Upload size cap, in bytes.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Uploads by any admin are shown under the agency name, not the
/// individual staff member's.
pub const AGENCY_DISPLAY_NAME: &str = "Atelier Studio";

/// A file as returned to clients, with the uploader display name applied.
#[derive(Debug, Serialize)]
pub struct FileView {
    pub id: DbId,
    pub file_name: String,
    pub file_url: String,
    pub uploaded_by: String,
    pub created_at: Timestamp,
}

impl From<FileWithUploader> for FileView {
    fn from(row: FileWithUploader) -> Self {
        let uploaded_by = if row.uploader_role.is_admin() {
            AGENCY_DISPLAY_NAME.to_string()
        } else {
            row.uploader_name
        };
        FileView {
            id: row.id,
            file_name: row.file_name,
            file_url: row.file_url,
            uploaded_by,
            created_at: row.created_at,
        }
    }
}

/// GET /api/v1/projects/{id}/files
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<FileView>>>> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("project", project_id)))?;

    let action = Action::AccessFiles {
        project_client_id: project.client_id,
    };
    if !can_access(&auth_user.actor(), &action) {
        return Err(AppError::Core(CoreError::forbidden(
            "You do not have access to this project",
        )));
    }

    let files = FileRepo::list_for_project(&state.pool, project_id).await?;
    let views = files.into_iter().map(FileView::from).collect();
    Ok(Json(DataResponse::new(views)))
}

/// POST /api/v1/projects/{id}/files
///
/// Multipart upload; the part named `file` carries the content. The bytes
/// go to the file store first, then the row is inserted, so a failed
/// insert can at worst leave an unreferenced stored file.
pub async fn upload(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectFile>>)> {
    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("project", project_id)))?;

    let action = Action::AccessFiles {
        project_client_id: project.client_id,
    };
    if !can_access(&auth_user.actor(), &action) {
        return Err(AppError::Core(CoreError::forbidden(
            "You do not have access to this project",
        )));
    }

    let mut upload: Option<(String, String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .unwrap_or("upload")
            .to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;
        upload = Some((file_name, mime_type, bytes.to_vec()));
        break;
    }

    let (file_name, mime_type, bytes) = upload
        .ok_or_else(|| AppError::BadRequest("multipart field 'file' is required".to_string()))?;

    if bytes.is_empty() {
        return Err(AppError::Core(CoreError::validation("File is empty")));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Core(CoreError::validation(
            "File exceeds the 10 MB upload limit",
        )));
    }

    let file_url = state
        .files
        .store(&bytes, &file_name)
        .await
        .map_err(|e| AppError::Internal(format!("file store error: {e}")))?;

    let record = FileRepo::create(
        &state.pool,
        &CreateFile {
            project_id,
            uploaded_by: auth_user.user_id,
            file_name,
            file_url,
            mime_type,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(record))))
}
