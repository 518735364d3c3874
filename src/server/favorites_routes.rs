use super::api_error::ApiError;
use super::extract::{AlbumIdKind, ArtistIdKind, IdKind, PathId, TrackIdKind};
use super::state::ServerState;
use crate::library::{FavoriteKind, Favorites};
use crate::services::FavoritesService;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

#[derive(Serialize)]
struct FavoriteAdded {
    message: String,
}

/// Ties a path id kind to the favorite collection it targets.
trait FavoriteTarget: IdKind {
    const KIND: FavoriteKind;
}

impl FavoriteTarget for ArtistIdKind {
    const KIND: FavoriteKind = FavoriteKind::Artist;
}

impl FavoriteTarget for AlbumIdKind {
    const KIND: FavoriteKind = FavoriteKind::Album;
}

impl FavoriteTarget for TrackIdKind {
    const KIND: FavoriteKind = FavoriteKind::Track;
}

async fn get_favorites(
    State(favorites): State<FavoritesService>,
) -> Result<Json<Favorites>, ApiError> {
    Ok(Json(favorites.find_all()?))
}

async fn add_favorite<K: FavoriteTarget>(
    State(favorites): State<FavoritesService>,
    PathId(id, _): PathId<K>,
) -> Result<(StatusCode, Json<FavoriteAdded>), ApiError> {
    favorites.add(K::KIND, &id)?;
    Ok((
        StatusCode::CREATED,
        Json(FavoriteAdded {
            message: format!("{} added to favorites", K::KIND.label()),
        }),
    ))
}

async fn remove_favorite<K: FavoriteTarget>(
    State(favorites): State<FavoritesService>,
    PathId(id, _): PathId<K>,
) -> Result<StatusCode, ApiError> {
    favorites.remove(K::KIND, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn make_favorites_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(get_favorites))
        .route(
            "/track/{id}",
            post(add_favorite::<TrackIdKind>).delete(remove_favorite::<TrackIdKind>),
        )
        .route(
            "/album/{id}",
            post(add_favorite::<AlbumIdKind>).delete(remove_favorite::<AlbumIdKind>),
        )
        .route(
            "/artist/{id}",
            post(add_favorite::<ArtistIdKind>).delete(remove_favorite::<ArtistIdKind>),
        )
}
