mod common;

use axum::http::{header, StatusCode};
use serde_json::json;
use service::auth::{Role, SessionTokens};

use common::*;

#[tokio::test]
async fn register_then_wrong_password_is_credentials_error() {
    let app = app();
    let body = json!({"name": "testuser", "email": "test@firm.io", "password": "rightpass"});
    let resp = send(&app, json_request("POST", "/api/admin/register", &body, None)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp).await, serde_json::Value::Null);

    let resp = send(&app, json_request("POST", "/api/admin/auth", &json!({"name": "testuser", "password": "wrongpass"}), None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(resp).await,
        json!({"error": "CredentialsError", "message": "Invalid email or password"})
    );
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = app();
    let resp = send(&app, json_request("POST", "/api/admin/auth", &json!({"name": "ghost", "password": "whatever"}), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["error"], "NotFoundError");
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let app = app();
    let body = json!({"name": "first", "email": "same@firm.io", "password": "rightpass"});
    send(&app, json_request("POST", "/api/admin/register", &body, None)).await;
    let body = json!({"name": "second", "email": "same@firm.io", "password": "rightpass"});
    let resp = send(&app, json_request("POST", "/api/admin/register", &body, None)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(resp).await["message"], "Email already in use");
}

#[tokio::test]
async fn login_sets_hardened_cookie_and_returns_user() {
    let app = app();
    let body = json!({"name": "Jane", "email": "jane@firm.io", "password": "rightpass"});
    send(&app, json_request("POST", "/api/admin/register", &body, None)).await;

    let resp = send(&app, json_request("POST", "/api/admin/auth", &json!({"name": "jane", "password": "rightpass"}), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=3600"));
    assert!(!set_cookie.contains("Secure"));

    let body = body_json(resp).await;
    assert_eq!(body["user"]["name"], "jane");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn status_requires_a_session() {
    let app = app();
    let resp = send(&app, empty_request("GET", "/api/admin/auth/status", None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await, json!({"error": "AuthorizationError", "message": "Missing token"}));

    let (cookie, user_id) = login_as(&app, "statususer").await;
    let resp = send(&app, empty_request("GET", "/api/admin/auth/status", Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"loggedIn": true, "userId": user_id, "userRole": "admin"}));
}

#[tokio::test]
async fn bearer_header_is_accepted() {
    let app = app();
    let token = SessionTokens::new(SECRET, 3600).issue("507f1f77bcf86cd799439011", Role::Admin).unwrap();
    let req = axum::http::Request::builder()
        .uri("/api/admin/auth/status")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    assert_eq!(send(&app, req).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn expired_and_foreign_tokens_get_the_same_401() {
    let app = app();
    let past = chrono::Utc::now().timestamp() - 60;
    let expired = SessionTokens::new(SECRET, 3600).issue_with_expiry("507f1f77bcf86cd799439011", Role::Admin, past).unwrap();
    let foreign = SessionTokens::new("someone-else", 3600).issue("507f1f77bcf86cd799439011", Role::Admin).unwrap();
    for token in [expired, foreign] {
        let cookie = format!("token={token}");
        let resp = send(&app, empty_request("GET", "/api/admin/auth/status", Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(resp).await,
            json!({"error": "AuthorizationError", "message": "Invalid or expired token"})
        );
    }
}

#[tokio::test]
async fn logout_clears_cookie() {
    let app = app();
    let resp = send(&app, empty_request("POST", "/api/admin/logout", Some("token=stale"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn profile_update_is_owner_only() {
    let app = app();
    let (alice_cookie, _) = login_as(&app, "alice").await;
    let (_, bob_id) = login_as(&app, "bob").await;

    let uri = format!("/api/admin/users/{bob_id}");
    let resp = send(&app, json_request("PATCH", &uri, &json!({"name": "mallory"}), Some(&alice_cookie))).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["error"], "OwnershipError");
}

#[tokio::test]
async fn profile_update_returns_public_fields() {
    let app = app();
    let (cookie, id) = login_as(&app, "carol").await;
    let uri = format!("/api/admin/users/{id}");
    let resp = send(&app, json_request("PATCH", &uri, &json!({"email": "Carol@New.io", "name": ""}), Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({"user": {"id": id, "name": "carol", "email": "carol@new.io", "role": "admin"}})
    );
}

#[tokio::test]
async fn malformed_json_is_validation_error() {
    let app = app();
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/admin/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let resp = send(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "ValidationError");
    assert_eq!(body["details"][0]["field"], "body");
}
