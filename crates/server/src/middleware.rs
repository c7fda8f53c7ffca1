//! Session guard for protected routes: `Authorization: Bearer <token>`, with
//! the session cookie as fallback. On success the verified
//! [`AuthContext`](service::auth::AuthContext) is placed in the request
//! extensions.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use crate::errors::ApiError;
use crate::state::ServerState;

pub async fn require_session(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_owned);
    let token = bearer.or_else(|| jar.get(&state.cookie.name).map(|c| c.value().to_owned()));

    let ctx = state.auth.verify_session(token.as_deref()).map_err(|e| {
        warn!(path = %req.uri().path(), reason = %e.message(), "session rejected");
        ApiError(e)
    })?;
    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}
