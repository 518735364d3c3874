use super::api_error::ApiError;
use super::extract::{AlbumIdKind, ArtistIdKind, PathId, TrackIdKind, ValidatedJson};
use super::state::ServerState;
use crate::library::{Album, AlbumInput, Artist, ArtistInput, Track, TrackInput};
use crate::services::{AlbumService, ArtistService, TrackService};

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

type ApiResult<T> = Result<T, ApiError>;

async fn create_artist(
    State(artists): State<ArtistService>,
    ValidatedJson(input): ValidatedJson<ArtistInput>,
) -> ApiResult<(StatusCode, Json<Artist>)> {
    Ok((StatusCode::CREATED, Json(artists.create(input)?)))
}

async fn get_artists(State(artists): State<ArtistService>) -> ApiResult<Json<Vec<Artist>>> {
    Ok(Json(artists.find_all()?))
}

async fn get_artist(
    State(artists): State<ArtistService>,
    PathId(id, _): PathId<ArtistIdKind>,
) -> ApiResult<Json<Artist>> {
    Ok(Json(artists.find_one(&id)?))
}

async fn put_artist(
    State(artists): State<ArtistService>,
    PathId(id, _): PathId<ArtistIdKind>,
    ValidatedJson(input): ValidatedJson<ArtistInput>,
) -> ApiResult<Json<Artist>> {
    Ok(Json(artists.update(&id, input)?))
}

async fn delete_artist(
    State(artists): State<ArtistService>,
    PathId(id, _): PathId<ArtistIdKind>,
) -> ApiResult<StatusCode> {
    artists.remove(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_album(
    State(albums): State<AlbumService>,
    ValidatedJson(input): ValidatedJson<AlbumInput>,
) -> ApiResult<(StatusCode, Json<Album>)> {
    Ok((StatusCode::CREATED, Json(albums.create(input)?)))
}

async fn get_albums(State(albums): State<AlbumService>) -> ApiResult<Json<Vec<Album>>> {
    Ok(Json(albums.find_all()?))
}

async fn get_album(
    State(albums): State<AlbumService>,
    PathId(id, _): PathId<AlbumIdKind>,
) -> ApiResult<Json<Album>> {
    Ok(Json(albums.find_one(&id)?))
}

async fn put_album(
    State(albums): State<AlbumService>,
    PathId(id, _): PathId<AlbumIdKind>,
    ValidatedJson(input): ValidatedJson<AlbumInput>,
) -> ApiResult<Json<Album>> {
    Ok(Json(albums.update(&id, input)?))
}

async fn delete_album(
    State(albums): State<AlbumService>,
    PathId(id, _): PathId<AlbumIdKind>,
) -> ApiResult<StatusCode> {
    albums.remove(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_track(
    State(tracks): State<TrackService>,
    ValidatedJson(input): ValidatedJson<TrackInput>,
) -> ApiResult<(StatusCode, Json<Track>)> {
    Ok((StatusCode::CREATED, Json(tracks.create(input)?)))
}

async fn get_tracks(State(tracks): State<TrackService>) -> ApiResult<Json<Vec<Track>>> {
    Ok(Json(tracks.find_all()?))
}

async fn get_track(
    State(tracks): State<TrackService>,
    PathId(id, _): PathId<TrackIdKind>,
) -> ApiResult<Json<Track>> {
    Ok(Json(tracks.find_one(&id)?))
}

async fn put_track(
    State(tracks): State<TrackService>,
    PathId(id, _): PathId<TrackIdKind>,
    ValidatedJson(input): ValidatedJson<TrackInput>,
) -> ApiResult<Json<Track>> {
    Ok(Json(tracks.update(&id, input)?))
}

async fn delete_track(
    State(tracks): State<TrackService>,
    PathId(id, _): PathId<TrackIdKind>,
) -> ApiResult<StatusCode> {
    tracks.remove(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn make_artist_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(get_artists).post(create_artist))
        .route(
            "/{id}",
            get(get_artist).put(put_artist).delete(delete_artist),
        )
}

pub fn make_album_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(get_albums).post(create_album))
        .route("/{id}", get(get_album).put(put_album).delete(delete_album))
}

pub fn make_track_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(get_tracks).post(create_track))
        .route("/{id}", get(get_track).put(put_track).delete(delete_track))
}
