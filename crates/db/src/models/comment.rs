//! Comment entity model and DTOs.
//!
//! Comments form a two-level tree: a top-level comment has `parent_id =
//! NULL`, a reply points at a top-level comment in the same project. The
//! same-project rule is enforced at insert time by the comment handler.

use atelier_core::attention::ThreadComment;
use atelier_core::roles::Role;
use atelier_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A comment row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub project_id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// A comment joined with its author, for list responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub content: String,
    pub author_id: DbId,
    pub author_name: String,
    #[sqlx(try_from = "String")]
    pub author_role: Role,
    pub author_email: String,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// The detector's view of a comment, tagged with its project.
#[derive(Debug, Clone, FromRow)]
pub struct DetectorComment {
    pub project_id: DbId,
    pub id: DbId,
    pub author_id: DbId,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl From<DetectorComment> for ThreadComment {
    fn from(row: DetectorComment) -> Self {
        ThreadComment {
            id: row.id,
            author_id: row.author_id,
            parent_id: row.parent_id,
            created_at: row.created_at,
        }
    }
}

/// DTO for inserting a comment.
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub project_id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub parent_id: Option<DbId>,
}
