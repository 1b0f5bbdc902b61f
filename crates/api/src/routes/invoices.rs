//! Route definitions for the `/invoices` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::invoice;
use crate::state::AppState;

/// Routes mounted at `/invoices`.
///
/// ```text
/// POST /   -> create (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(invoice::create))
}
