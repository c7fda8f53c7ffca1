use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Value};
use service::auth::AuthContext;

use crate::errors::ApiError;
use crate::state::{CookieSettings, ServerState};

fn session_cookie(settings: &CookieSettings, token: String) -> Cookie<'static> {
    Cookie::build((settings.name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .max_age(time::Duration::seconds(settings.max_age_secs))
        .build()
}

#[utoipa::path(
    post, path = "/api/admin/register", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Registered"),
        (status = 400, description = "Validation failed", body = crate::openapi::ErrorBody),
        (status = 409, description = "Email already in use", body = crate::openapi::ErrorBody)
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(raw) = body?;
    state.auth.register(&raw).await?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    post, path = "/api/admin/auth", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set"),
        (status = 401, description = "Invalid email or password", body = crate::openapi::ErrorBody),
        (status = 404, description = "User not found", body = crate::openapi::ErrorBody)
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let Json(raw) = body?;
    let session = state.auth.login(&raw).await?;
    let jar = jar.add(session_cookie(&state.cookie, session.token));
    Ok((jar, Json(json!({ "user": session.user }))))
}

#[utoipa::path(post, path = "/api/admin/logout", tag = "auth", responses((status = 200, description = "Session cookie cleared")))]
pub async fn logout(State(state): State<ServerState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::build(state.cookie.name.clone()).path("/"));
    (jar, StatusCode::OK)
}

#[utoipa::path(
    get, path = "/api/admin/auth/status", tag = "auth",
    responses(
        (status = 200, description = "Session is valid"),
        (status = 401, description = "Missing, invalid or expired token", body = crate::openapi::ErrorBody)
    )
)]
pub async fn status(Extension(ctx): Extension<AuthContext>) -> Json<Value> {
    Json(json!({ "loggedIn": true, "userId": ctx.user_id, "userRole": ctx.user_role }))
}

#[utoipa::path(
    patch, path = "/api/admin/users/{id}", tag = "auth",
    params(("id" = String, Path, description = "User id")),
    request_body = crate::openapi::ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated profile"),
        (status = 403, description = "Not the caller's profile", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update_profile(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(raw) = body?;
    let user = state.auth.update_profile(&ctx, &id, &raw).await?;
    Ok(Json(json!({
        "user": { "id": user.id, "name": user.name, "email": user.email, "role": user.role }
    })))
}
