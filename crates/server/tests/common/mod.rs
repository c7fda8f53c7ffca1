#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::build_router;
use server::ServerState;
use service::auth::repository::mock::MockUserRepository;
use service::blogs::repository::mock::MockBlogRepository;
use service::offerings::repository::mock::MockOfferingRepository;
use service::offerings::repository::OfferingRepository;

pub const SECRET: &str = "router-test-secret";

pub fn app() -> Router {
    app_with_offerings(Arc::new(MockOfferingRepository::default()))
}

/// Router whose service catalogue is backed by `offerings`.
pub fn app_with_offerings(offerings: Arc<dyn OfferingRepository>) -> Router {
    let auth = configs::AuthConfig { jwt_secret: SECRET.into(), ..Default::default() };
    let state = ServerState::new(
        Arc::new(MockUserRepository::default()),
        offerings,
        Arc::new(MockBlogRepository::default()),
        &auth,
    );
    build_router(state, tower_http::cors::CorsLayer::very_permissive())
}

pub fn json_request(method: &str, uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    builder.body(Body::from(serde_json::to_vec(body).unwrap())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

/// `name=value` part of the session cookie set by a response.
pub fn session_cookie(resp: &Response) -> String {
    let raw = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    raw.split(';').next().unwrap().to_string()
}

/// Register `name` and log in; returns the cookie and the user id.
pub async fn login_as(app: &Router, name: &str) -> (String, String) {
    let register = json!({"name": name, "email": format!("{name}@firm.io"), "password": "rightpass"});
    let resp = send(app, json_request("POST", "/api/admin/register", &register, None)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = send(app, json_request("POST", "/api/admin/auth", &json!({"name": name, "password": "rightpass"}), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);
    let body = body_json(resp).await;
    (cookie, body["user"]["id"].as_str().unwrap().to_string())
}

pub fn service_payload(name: &str) -> Value {
    json!({
        "name": name,
        "type": "accounting",
        "category": "bookkeeping",
        "shortDescription": "Monthly books kept tidy.",
        "fullDescription": "Reconciliations, ledgers and reporting.",
        "details": ["Reconciliation", "Month-end close"]
    })
}

pub fn blog_payload(title: &str) -> Value {
    json!({"title": title, "category": "accounting", "content": "Twenty characters at the very least."})
}
