pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod invoices;
pub mod projects;
pub mod tasks;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                  login (public)
/// /auth/change-password                        change password
/// /auth/password-reset/request                 request reset (public)
/// /auth/password-reset/confirm                 confirm reset (public)
///
/// /projects                                    list, create
/// /projects/{id}                               get, update, delete
/// /projects/{id}/comments                      list, create
/// /projects/{id}/comments/{comment_id}         delete
/// /projects/{id}/features                      create (admin)
/// /projects/{id}/features/{feature_id}         update, delete (admin)
/// /projects/{id}/files                         list, upload
/// /projects/{id}/stats                         project stats
///
/// /tasks                                       create (admin)
/// /tasks/{id}                                  update
///
/// /invoices                                    create (admin)
///
/// /users                                       list, create (admin)
/// /users/me                                    get, update own profile
/// /users/{id}                                  delete (admin)
///
/// /dashboard/admin-stats                       admin dashboard (admin)
/// /admin/activity-log                          export (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", projects::router())
        .nest("/tasks", tasks::router())
        .nest("/invoices", invoices::router())
        .nest("/users", users::router())
        .nest("/dashboard", dashboard::router())
        .nest("/admin", admin::router())
}
