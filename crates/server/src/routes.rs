pub mod auth;
pub mod blogs;
pub mod contact;
pub mod services;

use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::middleware::require_session;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public reads, session-guarded writes,
/// auth endpoints and the API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/admin/register", post(auth::register))
        .route("/api/admin/auth", post(auth::login))
        .route("/api/admin/logout", post(auth::logout))
        .route("/api/services", get(services::list))
        .route("/api/services/:id", get(services::get))
        .route("/api/services/slug/:slug", get(services::get_by_slug))
        .route("/api/blogs", get(blogs::list))
        .route("/api/blogs/:id", get(blogs::get))
        .route("/api/blogs/slug/:slug", get(blogs::get_by_slug))
        .route("/api/contact", post(contact::submit));

    let protected = Router::new()
        .route("/api/admin/auth/status", get(auth::status))
        .route("/api/admin/users/:id", patch(auth::update_profile))
        .route("/api/services", post(services::create))
        .route("/api/services/:id", patch(services::update).delete(services::delete))
        .route("/api/blogs", post(blogs::create))
        .route("/api/blogs/:id", patch(blogs::update).delete(blogs::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    public
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
