//! HTTP-level integration tests for project comments.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, create_test_user, expect_status, post_json_auth, token_for};
use sqlx::PgPool;

use atelier_core::roles::Role;
use atelier_db::models::comment::CreateComment;
use atelier_db::models::project::CreateProject;
use atelier_db::repositories::{CommentRepo, ProjectRepo};

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

/// A reply whose parent lives in another project is rejected and nothing
/// is persisted.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_reply_to_parent_in_other_project_is_rejected(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@agency.test", Role::Admin).await;
    let (client, _) = create_test_user(&pool, "client@agency.test", Role::Client).await;
    let project_a = create_test_project(&pool, client.id, "Project A").await;
    let project_b = create_test_project(&pool, client.id, "Project B").await;

    let parent = CommentRepo::create(
        &pool,
        &CreateComment {
            project_id: project_a,
            author_id: admin.id,
            content: "Top-level on A".to_string(),
            parent_id: None,
        },
    )
    .await
    .expect("comment creation should succeed");

    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_b}/comments"),
        &token_for(&admin),
        serde_json::json!({ "content": "Stray reply", "parent_id": parent.id }),
    )
    .await;

    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_FAILED");

    let comments = CommentRepo::list_for_project(&pool, project_b)
        .await
        .expect("comment listing should succeed");
    assert!(comments.is_empty(), "the rejected reply must not be stored");
}

/// Replying to a reply is rejected; the tree stays two levels deep.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_reply_to_reply_is_rejected(pool: PgPool) {
    let (admin, _) = create_test_user(&pool, "admin@agency.test", Role::Admin).await;
    let (client, _) = create_test_user(&pool, "client@agency.test", Role::Client).await;
    let project_id = create_test_project(&pool, client.id, "Project").await;

    let top = CommentRepo::create(
        &pool,
        &CreateComment {
            project_id,
            author_id: admin.id,
            content: "Top-level".to_string(),
            parent_id: None,
        },
    )
    .await
    .expect("comment creation should succeed");
    let reply = CommentRepo::create(
        &pool,
        &CreateComment {
            project_id,
            author_id: client.id,
            content: "Reply".to_string(),
            parent_id: Some(top.id),
        },
    )
    .await
    .expect("reply creation should succeed");

    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/comments"),
        &token_for(&admin),
        serde_json::json!({ "content": "Too deep", "parent_id": reply.id }),
    )
    .await;

    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_FAILED");
}

/// A client cannot comment on a project owned by a different client.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_client_cannot_comment_on_foreign_project(pool: PgPool) {
    let (owner, _) = create_test_user(&pool, "owner@agency.test", Role::Client).await;
    let (other, _) = create_test_user(&pool, "other@agency.test", Role::Client).await;
    let project_id = create_test_project(&pool, owner.id, "Owned project").await;

    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/comments"),
        &token_for(&other),
        serde_json::json!({ "content": "Hello" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
