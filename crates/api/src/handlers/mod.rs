//! Request handlers, grouped by resource.

pub mod activity_log;
pub mod auth;
pub mod comment;
pub mod dashboard;
pub mod feature;
pub mod file;
pub mod invoice;
pub mod password_reset;
pub mod project;
pub mod task;
pub mod user;

use atelier_core::types::DbId;
use atelier_db::repositories::UserRepo;
use atelier_db::DbPool;

use crate::error::AppResult;

/// Resolve the display name used in activity descriptions.
///
/// A stale token can outlive its account; falls back to a placeholder so
/// recording never blocks a mutation on a missing row.
pub(crate) async fn actor_name(pool: &DbPool, user_id: DbId) -> AppResult<String> {
    let name = UserRepo::find_by_id(pool, user_id)
        .await?
        .map(|user| user.name)
        .unwrap_or_else(|| "Unknown user".to_string());
    Ok(name)
}
