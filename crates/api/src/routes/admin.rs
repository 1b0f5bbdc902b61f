//! Route definitions for the `/admin` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::activity_log;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET /activity-log   -> export (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/activity-log", get(activity_log::export))
}
