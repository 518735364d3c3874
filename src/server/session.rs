use super::api_error::ApiError;
use super::state::ServerState;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

fn extract_bearer_token(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Rejects the request with 401 unless it carries a valid access token.
pub async fn require_session(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (parts, body) = request.into_parts();
    let Some(token) = extract_bearer_token(&parts) else {
        debug!("No bearer token in {} {}", parts.method, parts.uri);
        return Err(ApiError::unauthorized("Unauthorized"));
    };

    let user = state.auth.verify_access_token(&token).map_err(|err| {
        debug!("Rejected access token: {}", err);
        ApiError::from(err)
    })?;

    debug!("Authenticated {} for {} {}", user.login, parts.method, parts.uri);
    Ok(next.run(Request::from_parts(parts, body)).await)
}
