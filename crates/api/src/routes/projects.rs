//! Route definitions for the `/projects` resource and its nested
//! comments, features, files, and stats.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{comment, dashboard, feature, file, project};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create (admin)
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update (admin)
/// DELETE /{id}                              -> delete (admin)
///
/// GET    /{id}/comments                     -> comment::list
/// POST   /{id}/comments                     -> comment::create
/// DELETE /{id}/comments/{comment_id}        -> comment::delete
///
/// POST   /{id}/features                     -> feature::create (admin)
/// PUT    /{id}/features/{feature_id}        -> feature::update (admin)
/// DELETE /{id}/features/{feature_id}        -> feature::delete (admin)
///
/// GET    /{id}/files                        -> file::list
/// POST   /{id}/files                        -> file::upload
///
/// GET    /{id}/stats                        -> dashboard::project_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/comments", get(comment::list).post(comment::create))
        .route("/{id}/comments/{comment_id}", delete(comment::delete))
        .route("/{id}/features", post(feature::create))
        .route(
            "/{id}/features/{feature_id}",
            put(feature::update).delete(feature::delete),
        )
        .route("/{id}/files", get(file::list).post(file::upload))
        .route("/{id}/stats", get(dashboard::project_stats))
}
