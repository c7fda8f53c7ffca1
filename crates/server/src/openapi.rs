//! Request/response shapes for the OpenAPI document. Handlers take untyped
//! JSON; these types exist for documentation only.

use serde::Deserialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBody {
    /// Error kind, e.g. `ValidationError`.
    pub error: String,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

#[derive(ToSchema)]
pub struct RegisterRequest { pub name: String, pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub name: String, pub password: String }

#[derive(ToSchema)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub name: String,
    pub slug: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub short_description: String,
    pub full_description: String,
    pub details: Vec<String>,
    pub icon_url: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogRequest {
    pub title: String,
    pub category: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub content: String,
    pub author: Option<String>,
    /// RFC 3339, `YYYY-MM-DD` or unix milliseconds.
    pub published_at: Option<String>,
    pub is_published: Option<bool>,
    pub views_count: Option<i64>,
}

#[derive(ToSchema)]
pub struct ContactRequest { pub name: String, pub email: String, pub subject: String, pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::status,
        crate::routes::auth::update_profile,
        crate::routes::services::list,
        crate::routes::services::get,
        crate::routes::services::get_by_slug,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::blogs::list,
        crate::routes::blogs::get,
        crate::routes::blogs::get_by_slug,
        crate::routes::blogs::create,
        crate::routes::blogs::update,
        crate::routes::blogs::delete,
        crate::routes::contact::submit,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            RegisterRequest,
            LoginRequest,
            ProfileUpdateRequest,
            ServiceRequest,
            BlogRequest,
            ContactRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "services"),
        (name = "blogs"),
        (name = "contact")
    )
)]
pub struct ApiDoc;
