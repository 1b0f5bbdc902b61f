//! Route definitions for the `/users` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// `/me` is declared before `/{id}` so the literal segment wins.
///
/// ```text
/// GET    /       -> list (admin)
/// POST   /       -> create (admin)
/// GET    /me     -> me
/// PUT    /me     -> update_me
/// DELETE /{id}   -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list).post(user::create))
        .route("/me", get(user::me).put(user::update_me))
        .route("/{id}", delete(user::delete))
}
