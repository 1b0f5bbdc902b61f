//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::{auth, password_reset};
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login                    -> login
/// POST /change-password          -> change_password
/// POST /password-reset/request   -> request_reset
/// POST /password-reset/confirm   -> confirm_reset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/change-password", post(auth::change_password))
        .route("/password-reset/request", post(password_reset::request_reset))
        .route("/password-reset/confirm", post(password_reset::confirm_reset))
}
