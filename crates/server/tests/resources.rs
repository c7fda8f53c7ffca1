mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use service::offerings::repository::mock::UnavailableOfferingRepository;

use common::*;

#[tokio::test]
async fn empty_blog_list_is_not_found() {
    let app = app();
    let resp = send(&app, empty_request("GET", "/api/blogs", None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await, json!({"error": "NotFoundError", "message": "No blog found"}));
}

#[tokio::test]
async fn short_title_patch_reports_field_detail() {
    let app = app();
    let (cookie, _) = login_as(&app, "editor").await;
    let resp = send(&app, json_request("POST", "/api/blogs", &blog_payload("A proper title"), Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = body_json(resp).await["id"].as_str().unwrap().to_string();

    let resp = send(&app, json_request("PATCH", &format!("/api/blogs/{id}"), &json!({"title": "Hi"}), Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await,
        json!({
            "error": "ValidationError",
            "message": "Validation failed",
            "details": [{"field": "title", "message": "Title must be at least 5 characters"}]
        })
    );
}

#[tokio::test]
async fn deleting_unknown_service_is_not_found() {
    let app = app();
    let (cookie, _) = login_as(&app, "deleter").await;
    let resp = send(&app, empty_request("DELETE", "/api/services/507f1f77bcf86cd799439011", Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await, json!({"error": "NotFoundError", "message": "Service not found"}));
}

#[tokio::test]
async fn writes_require_a_session() {
    let app = app();
    let resp = send(&app, json_request("POST", "/api/services", &service_payload("Bookkeeping"), None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let resp = send(&app, empty_request("DELETE", "/api/blogs/507f1f77bcf86cd799439011", None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn service_lifecycle() {
    let app = app();
    let (cookie, _) = login_as(&app, "owner").await;

    for name in ["Payroll", "Audit & Assurance"] {
        let resp = send(&app, json_request("POST", "/api/services", &service_payload(name), Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
    let resp = send(&app, json_request("POST", "/api/services", &service_payload("Payroll"), Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(resp).await["details"], json!({"field": "name"}));

    let resp = send(&app, empty_request("GET", "/api/services", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let list = body_json(resp).await;
    let names: Vec<&str> = list.as_array().unwrap().iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Audit & Assurance", "Payroll"]);
    assert_eq!(list[0]["slug"], "audit-and-assurance");
    assert_eq!(list[0]["type"], "accounting");
    assert_eq!(list[0]["iconUrl"], "General");
    assert!(list[0].get("version").is_none());
    let id = list[0]["id"].as_str().unwrap().to_string();

    let resp = send(&app, json_request("PATCH", &format!("/api/services/{id}"), &json!({"name": "Audit"}), Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, empty_request("GET", "/api/services/slug/audit", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["id"], id.as_str());

    let resp = send(&app, empty_request("DELETE", &format!("/api/services/{id}"), Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = send(&app, empty_request("GET", &format!("/api/services/{id}"), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn storage_outage_is_internal_error() {
    let app = app_with_offerings(Arc::new(UnavailableOfferingRepository));
    let (cookie, _) = login_as(&app, "outage").await;
    let expected = json!({"error": "SystemError", "message": "Internal server error"});

    let resp = send(&app, json_request("POST", "/api/services", &service_payload("Payroll"), Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await, expected);

    let uri = "/api/services/507f1f77bcf86cd799439011";
    let resp = send(&app, json_request("PATCH", uri, &json!({"category": "payroll"}), Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await, expected);
}

#[tokio::test]
async fn get_with_malformed_id_is_bad_request() {
    let app = app();
    let resp = send(&app, empty_request("GET", "/api/blogs/not-an-id", None)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["details"][0]["message"], "Invalid id format");
}

#[tokio::test]
async fn empty_patch_is_rejected() {
    let app = app();
    let (cookie, _) = login_as(&app, "patcher").await;
    let resp = send(&app, json_request("POST", "/api/blogs", &blog_payload("Something to patch"), Some(&cookie))).await;
    let id = body_json(resp).await["id"].as_str().unwrap().to_string();

    for body in [json!({}), json!({"title": "", "description": null})] {
        let resp = send(&app, json_request("PATCH", &format!("/api/blogs/{id}"), &body, Some(&cookie))).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn contact_and_health() {
    let app = app();
    let body = json!({"name": "Ada", "email": "ada@example.com", "subject": "Tax help", "message": "Please call me back."});
    let resp = send(&app, json_request("POST", "/api/contact", &body, None)).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    assert_eq!(body_json(resp).await, json!({"received": true}));

    let resp = send(&app, empty_request("GET", "/health", None)).await;
    assert_eq!(body_json(resp).await, json!({"status": "ok"}));

    let resp = send(&app, empty_request("GET", "/api-docs/openapi.json", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await["paths"].get("/api/blogs/{id}").is_some());
}
