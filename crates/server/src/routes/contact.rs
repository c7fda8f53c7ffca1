use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(
    post, path = "/api/contact", tag = "contact",
    request_body = crate::openapi::ContactRequest,
    responses(
        (status = 202, description = "Message accepted"),
        (status = 400, description = "Validation failed", body = crate::openapi::ErrorBody)
    )
)]
pub async fn submit(
    State(state): State<ServerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(raw) = body?;
    state.contact.submit(&raw)?;
    Ok((StatusCode::ACCEPTED, Json(json!({ "received": true }))))
}
