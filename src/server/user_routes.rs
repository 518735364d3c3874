use super::api_error::ApiError;
use super::extract::{PathId, UserIdKind, ValidatedJson};
use super::state::ServerState;
use crate::services::UserService;
use crate::user::{Credentials, UpdatePasswordInput, User};

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

async fn create_user(
    State(users): State<UserService>,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    Ok((StatusCode::CREATED, Json(users.create(credentials)?)))
}

async fn get_users(State(users): State<UserService>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(users.find_all()?))
}

async fn get_user(
    State(users): State<UserService>,
    PathId(id, _): PathId<UserIdKind>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(users.find_one(&id)?))
}

async fn put_user_password(
    State(users): State<UserService>,
    PathId(id, _): PathId<UserIdKind>,
    ValidatedJson(input): ValidatedJson<UpdatePasswordInput>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(users.update_password(&id, input)?))
}

async fn delete_user(
    State(users): State<UserService>,
    PathId(id, _): PathId<UserIdKind>,
) -> Result<StatusCode, ApiError> {
    users.remove(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn make_user_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(get_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).put(put_user_password).delete(delete_user),
        )
}
