use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use service::{AppError, ErrorKind};
use tracing::error;

/// HTTP face of [`AppError`]: `{error, message, details?}` with the matching
/// status code.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::invalid_field("body", rejection.body_text()))
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Credentials | ErrorKind::Authorization => StatusCode::UNAUTHORIZED,
        ErrorKind::Ownership => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Duplicate => StatusCode::CONFLICT,
        ErrorKind::System => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if let AppError::System { cause, .. } = &err {
            error!(cause = %cause, "system error");
        }
        let mut body = json!({ "error": err.kind().name(), "message": err.message() });
        if let Some(details) = err.details() {
            body["details"] = details;
        }
        (status_for(err.kind()), Json(body)).into_response()
    }
}
