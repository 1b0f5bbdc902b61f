//! Route definitions for the `/tasks` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// POST /       -> create (admin)
/// PUT  /{id}   -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(task::create))
        .route("/{id}", put(task::update))
}
