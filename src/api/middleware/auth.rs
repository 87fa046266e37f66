//! Session cookie authentication middleware.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::api::AppState;
use crate::config::SESSION_COOKIE_NAME;
use crate::errors::AppError;

/// Session id carried by the request's cookie, if any.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Resolves the session cookie and injects the `SessionUser` into the
/// request extensions. Missing or expired sessions are rejected with 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_id = session_id(request.headers()).ok_or(AppError::Unauthorized)?;
    let user = state.auth_service.authenticate(&session_id).await?;

    tracing::debug!(user_id = %user.id, role = %user.role, "Session authenticated");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
