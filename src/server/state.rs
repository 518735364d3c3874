use axum::extract::FromRef;

use crate::auth::{AuthService, TokenIssuer};
use crate::library::LibraryStore;
use crate::services::{AlbumService, ArtistService, FavoritesService, TrackService, UserService};
use crate::user::{CredentialHasher, UserStore};
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedLibraryStore = Arc<dyn LibraryStore>;
pub type GuardedUserStore = Arc<dyn UserStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub users: UserService,
    pub artists: ArtistService,
    pub albums: AlbumService,
    pub tracks: TrackService,
    pub favorites: FavoritesService,
    pub auth: AuthService,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        library_store: GuardedLibraryStore,
        user_store: GuardedUserStore,
        hasher: CredentialHasher,
        tokens: TokenIssuer,
    ) -> Self {
        let users = UserService::new(user_store, hasher);
        ServerState {
            config,
            start_time: Instant::now(),
            auth: AuthService::new(users.clone(), tokens),
            users,
            artists: ArtistService::new(library_store.clone()),
            albums: AlbumService::new(library_store.clone()),
            tracks: TrackService::new(library_store.clone()),
            favorites: FavoritesService::new(library_store),
        }
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for UserService {
    fn from_ref(input: &ServerState) -> Self {
        input.users.clone()
    }
}

impl FromRef<ServerState> for ArtistService {
    fn from_ref(input: &ServerState) -> Self {
        input.artists.clone()
    }
}

impl FromRef<ServerState> for AlbumService {
    fn from_ref(input: &ServerState) -> Self {
        input.albums.clone()
    }
}

impl FromRef<ServerState> for TrackService {
    fn from_ref(input: &ServerState) -> Self {
        input.tracks.clone()
    }
}

impl FromRef<ServerState> for FavoritesService {
    fn from_ref(input: &ServerState) -> Self {
        input.favorites.clone()
    }
}

impl FromRef<ServerState> for AuthService {
    fn from_ref(input: &ServerState) -> Self {
        input.auth.clone()
    }
}
