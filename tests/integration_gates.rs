//! Authentication, authorization and validation behavior that is decided
//! before any query runs. These tests need no database.

mod common;

use axum::http::StatusCode;
use common::{body_json, request, setup_app_without_database, token_for};
use parent_portal::parent_portal_core::Role;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

const ACCESS_DENIED: &str = "Access denied. You do not have the required permission.";

fn homework_body() -> serde_json::Value {
    json!({
        "title": "Math Assignment",
        "description": "Complete exercises 1-10 from Chapter 5",
        "class": "10",
        "section": "A",
        "subject": "Mathematics",
        "dueDate": "2025-01-15"
    })
}

#[tokio::test]
async fn test_api_status() {
    let app = setup_app_without_database();

    let response = app.oneshot(request("GET", "/api", None, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Parent Portal API is running");
    assert!(body.get("timestamp").is_some());
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let app = setup_app_without_database();

    let response = app
        .oneshot(request("GET", "/api/report-cards", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Cannot GET /api/report-cards");
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let app = setup_app_without_database();

    let response = app
        .oneshot(request("GET", "/api/students", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = setup_app_without_database();

    let response = app
        .oneshot(request("GET", "/api/messages", Some("not.a.token"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = setup_app_without_database();

    let response = app
        .oneshot(request("GET", "/api/auth/me", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_parent_cannot_create_homework() {
    let app = setup_app_without_database();
    let token = token_for(Uuid::new_v4(), Role::Parent);

    let response = app
        .oneshot(request("POST", "/api/homework", Some(&token), Some(homework_body())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], ACCESS_DENIED);
}

#[tokio::test]
async fn test_parent_cannot_create_students() {
    let app = setup_app_without_database();
    let token = token_for(Uuid::new_v4(), Role::Parent);

    let response = app
        .oneshot(request(
            "POST",
            "/api/students",
            Some(&token),
            Some(json!({
                "name": "Alex Smith",
                "rollNumber": "101",
                "class": "10",
                "section": "A",
                "parentId": Uuid::new_v4()
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_parent_cannot_update_attendance() {
    let app = setup_app_without_database();
    let token = token_for(Uuid::new_v4(), Role::Parent);
    let uri = format!("/api/students/{}/attendance", Uuid::new_v4());

    let response = app
        .oneshot(request(
            "PUT",
            &uri,
            Some(&token),
            Some(json!({"present": 18, "absent": 2})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], ACCESS_DENIED);
}

#[tokio::test]
async fn test_negative_attendance_is_rejected() {
    let app = setup_app_without_database();
    let token = token_for(Uuid::new_v4(), Role::Teacher);
    let uri = format!("/api/students/{}/attendance", Uuid::new_v4());

    let response = app
        .oneshot(request("PUT", &uri, Some(&token), Some(json!({"present": -3}))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Attendance counters must be between 0 and 100000");
}

#[tokio::test]
async fn test_attendance_that_would_overflow_is_bad_request() {
    let app = setup_app_without_database();
    let token = token_for(Uuid::new_v4(), Role::Teacher);
    let uri = format!("/api/students/{}/attendance", Uuid::new_v4());

    let response = app
        .oneshot(request(
            "PUT",
            &uri,
            Some(&token),
            Some(json!({"present": 2147483647, "absent": 1})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Attendance counters must be between 0 and 100000");
}

#[tokio::test]
async fn test_homework_listing_requires_class_and_section() {
    let app = setup_app_without_database();
    let token = token_for(Uuid::new_v4(), Role::Parent);

    let response = app
        .oneshot(request("GET", "/api/homework?class=10", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Class and section are required");
}

#[tokio::test]
async fn test_teacher_homework_with_missing_field_is_bad_request() {
    let app = setup_app_without_database();
    let token = token_for(Uuid::new_v4(), Role::Teacher);
    let mut body = homework_body();
    body.as_object_mut().unwrap().remove("subject");

    let response = app
        .oneshot(request("POST", "/api/homework", Some(&token), Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "subject is required");
}

#[tokio::test]
async fn test_register_validation() {
    let app = setup_app_without_database();

    let response = app
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Jane Doe",
                "email": "jane@x.com",
                "password": "123",
                "phone": "5551234567"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Password must be at least 6 characters long");
}

#[tokio::test]
async fn test_register_rejects_bad_phone() {
    let app = setup_app_without_database();

    let response = app
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Jane Doe",
                "email": "jane@x.com",
                "password": "secret1",
                "phone": "555-1234"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Phone number must be 10 digits");
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = setup_app_without_database();

    let response = app
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "parent@example.com"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Email and password are required");
}

#[tokio::test]
async fn test_teacher_cannot_change_another_users_password() {
    let app = setup_app_without_database();
    let token = token_for(Uuid::new_v4(), Role::Teacher);
    let uri = format!("/api/users/{}/password", Uuid::new_v4());

    let response = app
        .oneshot(request(
            "PUT",
            &uri,
            Some(&token),
            Some(json!({"currentPassword": "password", "newPassword": "newsecret"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_parent_cannot_update_another_profile() {
    let app = setup_app_without_database();
    let token = token_for(Uuid::new_v4(), Role::Parent);
    let uri = format!("/api/users/{}", Uuid::new_v4());

    let response = app
        .oneshot(request("PUT", &uri, Some(&token), Some(json!({"name": "Mallory"}))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_empty_profile_update_is_bad_request() {
    let app = setup_app_without_database();
    let token = token_for(Uuid::new_v4(), Role::Parent);

    let response = app
        .oneshot(request("PUT", "/api/users/profile", Some(&token), Some(json!({}))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "At least one of name, email or phone is required");
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    let app = setup_app_without_database();
    let token = token_for(Uuid::new_v4(), Role::Parent);

    let response = app
        .oneshot(request(
            "POST",
            "/api/messages",
            Some(&token),
            Some(json!({"receiverId": Uuid::new_v4(), "content": ""})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_self_addressed_message_is_rejected() {
    let app = setup_app_without_database();
    let id = Uuid::new_v4();
    let token = token_for(id, Role::Teacher);

    let response = app
        .oneshot(request(
            "POST",
            "/api/messages",
            Some(&token),
            Some(json!({"receiverId": id, "content": "Note to self"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "You cannot send a message to yourself");
}

#[tokio::test]
async fn test_malformed_path_id_is_bad_request() {
    let app = setup_app_without_database();
    let token = token_for(Uuid::new_v4(), Role::Admin);

    let response = app
        .oneshot(request("GET", "/api/students/not-a-uuid", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid ID in request path");
}

#[tokio::test]
async fn test_scalar_ui_is_served() {
    let app = setup_app_without_database();

    let response = app
        .oneshot(request("GET", "/scalar", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
