//! HTTP-level integration tests for project updates and their activity
//! records.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{build_test_app, create_test_user, put_json_auth, token_for};
use sqlx::PgPool;

use atelier_core::roles::Role;
use atelier_db::models::activity::ActivityWithContext;
use atelier_db::models::project::CreateProject;
use atelier_db::repositories::{ActivityRepo, ProjectRepo};

/// Seed a project owned by the given client.
async fn create_test_project(pool: &PgPool, client_id: i64, title: &str) -> i64 {
    let input = CreateProject {
        title: title.to_string(),
        description: None,
        client_id,
        contact_person: None,
        staging_url: None,
        timeline: None,
    };
    ProjectRepo::create(pool, &input)
        .await
        .expect("project creation should succeed")
        .id
}

/// Activity inserts are detached from the request; poll briefly for them.
async fn wait_for_activities(pool: &PgPool, project_id: i64) -> Vec<ActivityWithContext> {
    for _ in 0..40 {
        let rows = ActivityRepo::list_recent_for_project(pool, project_id, 10)
            .await
            .expect("activity listing should succeed");
        if !rows.is_empty() {
            return rows;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    Vec::new()
}

/// Renaming a project leaves a TITLE_CHANGED record carrying both titles.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_title_change_records_activity(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@agency.test", Role::Admin).await;
    let (client, _) = create_test_user(&pool, "client@agency.test", Role::Client).await;
    let project_id = create_test_project(&pool, client.id, "Old name").await;

    let app = build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&admin),
        serde_json::json!({ "title": "New name" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let activities = wait_for_activities(&pool, project_id).await;
    assert_eq!(activities.len(), 1, "exactly one record must be written");
    assert_eq!(activities[0].activity_type, "TITLE_CHANGED");
    assert_eq!(activities[0].metadata["oldValue"], "Old name");
    assert_eq!(activities[0].metadata["newValue"], "New name");
}

/// Re-submitting the stored title is a successful update that records
/// nothing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unchanged_title_records_nothing(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@agency.test", Role::Admin).await;
    let (client, _) = create_test_user(&pool, "client@agency.test", Role::Client).await;
    let project_id = create_test_project(&pool, client.id, "Same name").await;

    let app = build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&admin),
        serde_json::json!({ "title": "Same name" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Long enough for a stray detached insert to have landed.
    tokio::time::sleep(Duration::from_millis(300)).await;
    let activities = ActivityRepo::list_recent_for_project(&pool, project_id, 10)
        .await
        .expect("activity listing should succeed");
    assert!(
        activities.is_empty(),
        "a no-op title update must not be recorded, got {activities:?}"
    );
}

/// Clients cannot update projects at all, even their own.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_client_cannot_update_project(pool: PgPool) {
    let (client, _) = create_test_user(&pool, "client@agency.test", Role::Client).await;
    let project_id = create_test_project(&pool, client.id, "Client project").await;

    let app = build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &token_for(&client),
        serde_json::json!({ "title": "Renamed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
