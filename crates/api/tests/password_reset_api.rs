//! HTTP-level integration tests for the password-reset flow.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, create_test_user, expect_status, post_json};
use sqlx::PgPool;

use atelier_core::roles::Role;
use atelier_db::repositories::UserRepo;

/// A reset request for a known and for an unknown email must be
/// byte-for-byte indistinguishable: same status, same body.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_reset_request_response_is_identical_for_unknown_email(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "known@agency.test", Role::Client).await;

    let app = build_test_app(pool.clone());
    let known = post_json(
        app,
        "/api/v1/auth/password-reset/request",
        serde_json::json!({ "email": "known@agency.test" }),
    )
    .await;
    let known_body = expect_status(known, StatusCode::OK).await;

    let app = build_test_app(pool.clone());
    let unknown = post_json(
        app,
        "/api/v1/auth/password-reset/request",
        serde_json::json!({ "email": "ghost@agency.test" }),
    )
    .await;
    let unknown_body = expect_status(unknown, StatusCode::OK).await;

    assert_eq!(known_body, unknown_body);

    // Behind the identical response, the known account did get a token.
    let row = UserRepo::find_by_id(&pool, user.id)
        .await
        .expect("lookup should succeed")
        .expect("user must exist");
    assert!(row.reset_token_hash.is_some());
    assert!(row.reset_token_expires_at.is_some());
}

/// Confirming with a token that was never issued fails validation.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_confirm_with_unknown_token_fails(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/password-reset/confirm",
        serde_json::json!({
            "token": "never-issued-token",
            "new_password": "fresh_password_1"
        }),
    )
    .await;
    let json = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_FAILED");
}

/// The email casing used at request time does not matter; addresses are
/// stored and matched lowercase.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_reset_request_matches_email_case_insensitively(pool: PgPool) {
    let (user, _) = create_test_user(&pool, "mixed@agency.test", Role::Client).await;

    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/password-reset/request",
        serde_json::json!({ "email": "MIXED@Agency.Test" }),
    )
    .await;
    expect_status(response, StatusCode::OK).await;

    let row = UserRepo::find_by_id(&pool, user.id)
        .await
        .expect("lookup should succeed")
        .expect("user must exist");
    assert!(row.reset_token_hash.is_some());
}
