use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::Value;
use service::auth::AuthContext;
use service::offerings::Offering;

use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/services", tag = "services",
    responses(
        (status = 200, description = "All services ordered by name"),
        (status = 404, description = "No service found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Offering>>, ApiError> {
    Ok(Json(state.services.list().await?))
}

#[utoipa::path(
    get, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses((status = 200, description = "Service"), (status = 404, description = "Service not found", body = crate::openapi::ErrorBody))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Offering>, ApiError> {
    Ok(Json(state.services.get(&id).await?))
}

#[utoipa::path(
    get, path = "/api/services/slug/{slug}", tag = "services",
    params(("slug" = String, Path, description = "Service slug")),
    responses((status = 200, description = "Service"), (status = 404, description = "Service not found", body = crate::openapi::ErrorBody))
)]
pub async fn get_by_slug(State(state): State<ServerState>, Path(slug): Path<String>) -> Result<Json<Offering>, ApiError> {
    Ok(Json(state.services.get_by_slug(&slug).await?))
}

#[utoipa::path(
    post, path = "/api/services", tag = "services",
    request_body = crate::openapi::ServiceRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation failed", body = crate::openapi::ErrorBody),
        (status = 401, description = "Not an authenticated admin", body = crate::openapi::ErrorBody),
        (status = 409, description = "Name or slug taken", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Offering>), ApiError> {
    let Json(raw) = body?;
    let created = state.services.create(&ctx, &raw).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    request_body = crate::openapi::ServiceRequest,
    responses((status = 204, description = "Updated"), (status = 404, description = "Service not found", body = crate::openapi::ErrorBody))
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(raw) = body?;
    state.services.update(&ctx, &id, &raw).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Service not found", body = crate::openapi::ErrorBody))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.services.delete(&ctx, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
