//! Handlers for project comments.
//!
//! Comments form a two-level tree: top-level comments carry replies,
//! replies cannot be replied to. The tree shape is produced here from the
//! flat author-joined rows.

use atelier_core::access::{can_access, Action};
use atelier_core::activity::{comment_preview, ActivityKind};
use atelier_core::error::CoreError;
use atelier_core::roles::Role;
use atelier_core::types::{DbId, Timestamp};
use atelier_db::models::comment::{Comment, CommentWithAuthor, CreateComment};
use atelier_db::models::project::Project;
use atelier_db::repositories::{CommentRepo, ProjectRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::actor_name;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects/{id}/comments`.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub parent_id: Option<DbId>,
}

/// A top-level comment with its replies, as returned to clients.
#[derive(Debug, Serialize)]
pub struct CommentNode {
    pub id: DbId,
    pub content: String,
    pub author_id: DbId,
    pub author_name: String,
    pub author_role: Role,
    pub created_at: Timestamp,
    pub replies: Vec<CommentReply>,
}

/// A reply inside a [`CommentNode`].
#[derive(Debug, Serialize)]
pub struct CommentReply {
    pub id: DbId,
    pub content: String,
    pub author_id: DbId,
    pub author_name: String,
    pub author_role: Role,
    pub created_at: Timestamp,
}

/// GET /api/v1/projects/{id}/comments
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CommentNode>>>> {
    let project = find_project(&state, project_id).await?;
    require(
        &auth_user,
        Action::ViewProject {
            project_client_id: project.client_id,
        },
    )?;

    let rows = CommentRepo::list_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse::new(build_comment_tree(rows))))
}

/// POST /api/v1/projects/{id}/comments
///
/// Add a comment or a reply. Only a top-level comment produces an activity
/// record; reply churn stays out of the feed.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    let project = find_project(&state, project_id).await?;
    require(
        &auth_user,
        Action::CommentOnProject {
            project_client_id: project.client_id,
        },
    )?;

    let content = input.content.trim().to_string();
    if content.is_empty() {
        return Err(AppError::Core(CoreError::validation(
            "Comment content cannot be empty",
        )));
    }

    if let Some(parent_id) = input.parent_id {
        let parent = CommentRepo::find_by_id(&state.pool, parent_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::validation("Parent comment does not exist"))
            })?;
        if parent.project_id != project_id {
            return Err(AppError::Core(CoreError::validation(
                "Parent comment belongs to a different project",
            )));
        }
        if parent.parent_id.is_some() {
            return Err(AppError::Core(CoreError::validation(
                "Replies to replies are not allowed",
            )));
        }
    }

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            project_id,
            author_id: auth_user.user_id,
            content,
            parent_id: input.parent_id,
        },
    )
    .await?;

    if comment.parent_id.is_none() {
        let name = actor_name(&state.pool, auth_user.user_id).await?;
        state.recorder.record(
            project_id,
            auth_user.user_id,
            &name,
            ActivityKind::Comment {
                comment_id: comment.id,
                preview: comment_preview(&comment.content),
            },
        );
    }

    Ok((StatusCode::CREATED, Json(DataResponse::new(comment))))
}

/// DELETE /api/v1/projects/{id}/comments/{comment_id}
///
/// Replies cascade at the schema level when a top-level comment goes.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((project_id, comment_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let project = find_project(&state, project_id).await?;

    let comment = CommentRepo::find_by_id(&state.pool, comment_id)
        .await?
        .filter(|c| c.project_id == project_id)
        .ok_or_else(|| AppError::Core(CoreError::not_found("comment", comment_id)))?;

    require(
        &auth_user,
        Action::DeleteComment {
            comment_author_id: comment.author_id,
            project_client_id: project.client_id,
        },
    )?;

    CommentRepo::delete(&state.pool, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fold flat author-joined rows (newest first) into the two-level tree.
/// Replies are shown oldest first within their thread.
pub fn build_comment_tree(rows: Vec<CommentWithAuthor>) -> Vec<CommentNode> {
    let (roots, replies): (Vec<_>, Vec<_>) =
        rows.into_iter().partition(|row| row.parent_id.is_none());

    let mut nodes: Vec<CommentNode> = roots
        .into_iter()
        .map(|row| CommentNode {
            id: row.id,
            content: row.content,
            author_id: row.author_id,
            author_name: row.author_name,
            author_role: row.author_role,
            created_at: row.created_at,
            replies: Vec::new(),
        })
        .collect();

    let mut replies = replies;
    replies.sort_by_key(|row| (row.created_at, row.id));
    for row in replies {
        let parent_id = row.parent_id;
        if let Some(parent) = nodes.iter_mut().find(|node| Some(node.id) == parent_id) {
            parent.replies.push(CommentReply {
                id: row.id,
                content: row.content,
                author_id: row.author_id,
                author_name: row.author_name,
                author_role: row.author_role,
                created_at: row.created_at,
            });
        }
    }

    nodes
}

async fn find_project(state: &AppState, project_id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("project", project_id)))
}

fn require(auth_user: &AuthUser, action: Action) -> AppResult<()> {
    if !can_access(&auth_user.actor(), &action) {
        return Err(AppError::Core(CoreError::forbidden(
            "You do not have access to this project",
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn row(id: DbId, parent_id: Option<DbId>, minutes: i64) -> CommentWithAuthor {
        CommentWithAuthor {
            id,
            content: format!("comment {id}"),
            author_id: 1,
            author_name: "Alice".into(),
            author_role: Role::Admin,
            author_email: "alice@example.com".into(),
            parent_id,
            created_at: Utc::now() + Duration::minutes(minutes),
        }
    }

    #[test]
    fn test_tree_nests_replies_under_roots() {
        // Newest-first input, as the repository returns it.
        let rows = vec![row(4, Some(1), 3), row(3, None, 2), row(2, Some(1), 1), row(1, None, 0)];

        let tree = build_comment_tree(rows);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id, 3);
        assert!(tree[0].replies.is_empty());
        assert_eq!(tree[1].id, 1);

        // Replies come back oldest first.
        let reply_ids: Vec<DbId> = tree[1].replies.iter().map(|r| r.id).collect();
        assert_eq!(reply_ids, vec![2, 4]);
    }

    #[test]
    fn test_orphan_reply_is_dropped() {
        let rows = vec![row(2, Some(99), 1), row(1, None, 0)];
        let tree = build_comment_tree(rows);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].replies.is_empty());
    }
}
