//! Route definitions for the `/dashboard` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /admin-stats   -> admin_stats (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/admin-stats", get(dashboard::admin_stats))
}
