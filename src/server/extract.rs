use super::api_error::ApiError;
use crate::validation::InputSchema;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde_json::Value;
use std::marker::PhantomData;

/// A JSON body checked against its [`InputSchema`].
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: InputSchema + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        Ok(ValidatedJson(T::from_json(&value)?))
    }
}

/// Names the entity a path id refers to, for the rejection message.
pub trait IdKind: Send + Sync + 'static {
    const LABEL: &'static str;
}

pub struct UserIdKind;
pub struct ArtistIdKind;
pub struct AlbumIdKind;
pub struct TrackIdKind;

impl IdKind for UserIdKind {
    const LABEL: &'static str = "user";
}

impl IdKind for ArtistIdKind {
    const LABEL: &'static str = "artist";
}

impl IdKind for AlbumIdKind {
    const LABEL: &'static str = "album";
}

impl IdKind for TrackIdKind {
    const LABEL: &'static str = "track";
}

/// The `{id}` path segment, accepted only in hyphenated UUID form and
/// normalized to lowercase.
pub struct PathId<K>(pub String, pub PhantomData<K>);

pub fn parse_uuid(raw: &str) -> Option<String> {
    if raw.len() != 36 {
        return None;
    }
    uuid::Uuid::parse_str(raw)
        .ok()
        .map(|id| id.hyphenated().to_string())
}

impl<S, K> FromRequestParts<S> for PathId<K>
where
    S: Send + Sync,
    K: IdKind,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = || ApiError::bad_request(format!("Invalid {} ID (not UUID)", K::LABEL));
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;
        parse_uuid(&raw)
            .map(|id| PathId(id, PhantomData))
            .ok_or_else(invalid)
    }
}
