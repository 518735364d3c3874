use super::api_error::ApiError;
use super::extract::ValidatedJson;
use super::state::ServerState;
use crate::auth::{AuthService, TokenPair};
use crate::user::Credentials;

use axum::{body::Bytes, extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct SignupResponse {
    message: &'static str,
}

async fn signup(
    State(auth): State<AuthService>,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    auth.signup(credentials)?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully",
        }),
    ))
}

async fn login(
    State(auth): State<AuthService>,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> Result<Json<TokenPair>, ApiError> {
    Ok(Json(auth.login(credentials)?))
}

/// Reads `refreshToken` from any body shape. Anything that does not yield a
/// string token counts as a missing token.
fn refresh_token_from_body(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("refreshToken")?.as_str().map(str::to_string)
}

async fn refresh(State(auth): State<AuthService>, body: Bytes) -> Result<Json<TokenPair>, ApiError> {
    let token = refresh_token_from_body(&body);
    Ok(Json(auth.refresh(token.as_deref())?))
}

pub fn make_auth_routes() -> Router<ServerState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}
