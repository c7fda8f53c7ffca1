use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::Value;
use service::auth::AuthContext;
use service::blogs::Blog;

use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/api/blogs", tag = "blogs",
    responses(
        (status = 200, description = "All posts ordered by title"),
        (status = 404, description = "No blog found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Blog>>, ApiError> {
    Ok(Json(state.blogs.list().await?))
}

#[utoipa::path(
    get, path = "/api/blogs/{id}", tag = "blogs",
    params(("id" = String, Path, description = "Blog id")),
    responses((status = 200, description = "Blog post"), (status = 404, description = "Blog not found", body = crate::openapi::ErrorBody))
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Blog>, ApiError> {
    Ok(Json(state.blogs.get(&id).await?))
}

#[utoipa::path(
    get, path = "/api/blogs/slug/{slug}", tag = "blogs",
    params(("slug" = String, Path, description = "Blog slug")),
    responses((status = 200, description = "Blog post"), (status = 404, description = "Blog not found", body = crate::openapi::ErrorBody))
)]
pub async fn get_by_slug(State(state): State<ServerState>, Path(slug): Path<String>) -> Result<Json<Blog>, ApiError> {
    Ok(Json(state.blogs.get_by_slug(&slug).await?))
}

#[utoipa::path(
    post, path = "/api/blogs", tag = "blogs",
    request_body = crate::openapi::BlogRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation failed", body = crate::openapi::ErrorBody),
        (status = 401, description = "Not an authenticated admin", body = crate::openapi::ErrorBody),
        (status = 409, description = "Title or slug taken", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Blog>), ApiError> {
    let Json(raw) = body?;
    let created = state.blogs.create(&ctx, &raw).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch, path = "/api/blogs/{id}", tag = "blogs",
    params(("id" = String, Path, description = "Blog id")),
    request_body = crate::openapi::BlogRequest,
    responses((status = 204, description = "Updated"), (status = 404, description = "Blog not found", body = crate::openapi::ErrorBody))
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(raw) = body?;
    state.blogs.update(&ctx, &id, &raw).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/blogs/{id}", tag = "blogs",
    params(("id" = String, Path, description = "Blog id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Blog not found", body = crate::openapi::ErrorBody))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.blogs.delete(&ctx, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
