mod common;

use axum::http::StatusCode;
use common::{TEST_PASSWORD, body_json, create_test_user, request, setup_test_app, test_jwt_config};
use parent_portal::parent_portal_auth::verify_token;
use parent_portal::parent_portal_core::Role;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn jane() -> serde_json::Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@x.com",
        "password": "secret1",
        "phone": "5551234567"
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_creates_parent_account(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(request("POST", "/api/auth/register", None, Some(jane())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["name"], "Jane Doe");
    assert_eq!(body["user"]["email"], "jane@x.com");
    assert_eq!(body["user"]["role"], "parent");
    assert!(body["user"].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = setup_test_app(pool);

    let first = app
        .clone()
        .oneshot(request("POST", "/api/auth/register", None, Some(jane())))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(request("POST", "/api/auth/register", None, Some(jane())))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = body_json(second).await;
    assert_eq!(body["error"], "User already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_returns_token_with_role(pool: PgPool) {
    let teacher = create_test_user(&pool, "Ms. Rivera", Role::Teacher).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": teacher.email, "password": TEST_PASSWORD})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "teacher");

    let claims = verify_token(body["token"].as_str().unwrap(), &test_jwt_config()).unwrap();
    assert_eq!(claims.sub, teacher.id.to_string());
    assert_eq!(claims.role, Role::Teacher);
    assert_eq!(claims.email, teacher.email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_with_wrong_password(pool: PgPool) {
    let parent = create_test_user(&pool, "Pat Smith", Role::Parent).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": parent.email, "password": "wrong-password"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_with_unknown_email(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "nobody@example.com", "password": "whatever"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_returns_profile(pool: PgPool) {
    let admin = create_test_user(&pool, "Admin User", Role::Admin).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(request("GET", "/api/auth/me", Some(&admin.token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], admin.id.to_string());
    assert_eq!(body["role"], "admin");
    assert_eq!(body["phone"], "5551234567");
}
