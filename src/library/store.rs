use super::models::{Album, Artist, FavoriteKind, Favorites, Track};
use anyhow::Result;

/// Result of a write that depends on other rows existing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    Written,
    /// The row being updated does not exist.
    Missing,
    /// A referenced artist or album does not exist.
    MissingReference(FavoriteKind, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteAdd {
    Added,
    AlreadyFavorite,
    MissingEntity,
}

/// Storage backend for artists, albums, tracks and favorites.
///
/// Every method is atomic. The `remove_*` methods also apply the cascade
/// rules: references to the removed row are set to null and the row is
/// dropped from the favorites.
pub trait LibraryStore: Send + Sync {
    fn list_artists(&self) -> Result<Vec<Artist>>;
    fn get_artist(&self, id: &str) -> Result<Option<Artist>>;
    fn insert_artist(&self, artist: &Artist) -> Result<()>;
    fn update_artist(&self, artist: &Artist) -> Result<StoreWrite>;
    /// Returns false if there was no such artist.
    fn remove_artist(&self, id: &str) -> Result<bool>;

    fn list_albums(&self) -> Result<Vec<Album>>;
    fn get_album(&self, id: &str) -> Result<Option<Album>>;
    fn insert_album(&self, album: &Album) -> Result<StoreWrite>;
    fn update_album(&self, album: &Album) -> Result<StoreWrite>;
    fn remove_album(&self, id: &str) -> Result<bool>;

    fn list_tracks(&self) -> Result<Vec<Track>>;
    fn get_track(&self, id: &str) -> Result<Option<Track>>;
    fn insert_track(&self, track: &Track) -> Result<StoreWrite>;
    fn update_track(&self, track: &Track) -> Result<StoreWrite>;
    fn remove_track(&self, id: &str) -> Result<bool>;

    /// Favorites in insertion order, skipping entries that no longer resolve.
    fn list_favorites(&self) -> Result<Favorites>;
    fn add_favorite(&self, kind: FavoriteKind, entity_id: &str) -> Result<FavoriteAdd>;
    /// Returns false if the entity was not a favorite.
    fn remove_favorite(&self, kind: FavoriteKind, entity_id: &str) -> Result<bool>;
}
