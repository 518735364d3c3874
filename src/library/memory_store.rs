use super::models::{Album, Artist, FavoriteKind, Favorites, Track};
use super::store::{FavoriteAdd, LibraryStore, StoreWrite};
use anyhow::Result;
use std::sync::Mutex;

#[derive(Default)]
struct Collections {
    artists: Vec<Artist>,
    albums: Vec<Album>,
    tracks: Vec<Track>,
    favorites: Vec<(FavoriteKind, String)>,
}

impl Collections {
    fn contains(&self, kind: FavoriteKind, id: &str) -> bool {
        match kind {
            FavoriteKind::Artist => self.artists.iter().any(|a| a.id == id),
            FavoriteKind::Album => self.albums.iter().any(|a| a.id == id),
            FavoriteKind::Track => self.tracks.iter().any(|t| t.id == id),
        }
    }

    fn missing_reference(&self, refs: &[(FavoriteKind, &Option<String>)]) -> Option<StoreWrite> {
        refs.iter().find_map(|(kind, id)| match id {
            Some(id) if !self.contains(*kind, id) => {
                Some(StoreWrite::MissingReference(*kind, id.clone()))
            }
            _ => None,
        })
    }

    fn drop_favorite(&mut self, kind: FavoriteKind, id: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|(k, fav)| !(*k == kind && fav == id));
        self.favorites.len() != before
    }
}

/// Keeps the whole library in process memory. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryLibraryStore {
    inner: Mutex<Collections>,
}

impl MemoryLibraryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn replace<T, F: Fn(&T) -> bool>(items: &mut [T], matches: F, value: T) -> bool {
    match items.iter_mut().find(|item| matches(item)) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => false,
    }
}

impl LibraryStore for MemoryLibraryStore {
    fn list_artists(&self) -> Result<Vec<Artist>> {
        Ok(self.inner.lock().unwrap().artists.clone())
    }

    fn get_artist(&self, id: &str) -> Result<Option<Artist>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.artists.iter().find(|a| a.id == id).cloned())
    }

    fn insert_artist(&self, artist: &Artist) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.contains(FavoriteKind::Artist, &artist.id) {
            anyhow::bail!("Artist with id '{}' already exists", artist.id);
        }
        inner.artists.push(artist.clone());
        Ok(())
    }

    fn update_artist(&self, artist: &Artist) -> Result<StoreWrite> {
        let mut inner = self.inner.lock().unwrap();
        let found = replace(&mut inner.artists, |a| a.id == artist.id, artist.clone());
        Ok(if found {
            StoreWrite::Written
        } else {
            StoreWrite::Missing
        })
    }

    fn remove_artist(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let Some(pos) = inner.artists.iter().position(|a| a.id == id) else {
            return Ok(false);
        };
        inner.artists.remove(pos);
        for album in inner.albums.iter_mut() {
            if album.artist_id.as_deref() == Some(id) {
                album.artist_id = None;
            }
        }
        for track in inner.tracks.iter_mut() {
            if track.artist_id.as_deref() == Some(id) {
                track.artist_id = None;
            }
        }
        inner.drop_favorite(FavoriteKind::Artist, id);
        Ok(true)
    }

    fn list_albums(&self) -> Result<Vec<Album>> {
        Ok(self.inner.lock().unwrap().albums.clone())
    }

    fn get_album(&self, id: &str) -> Result<Option<Album>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.albums.iter().find(|a| a.id == id).cloned())
    }

    fn insert_album(&self, album: &Album) -> Result<StoreWrite> {
        let mut inner = self.inner.lock().unwrap();
        if inner.contains(FavoriteKind::Album, &album.id) {
            anyhow::bail!("Album with id '{}' already exists", album.id);
        }
        if let Some(missing) = inner.missing_reference(&[(FavoriteKind::Artist, &album.artist_id)])
        {
            return Ok(missing);
        }
        inner.albums.push(album.clone());
        Ok(StoreWrite::Written)
    }

    fn update_album(&self, album: &Album) -> Result<StoreWrite> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.contains(FavoriteKind::Album, &album.id) {
            return Ok(StoreWrite::Missing);
        }
        if let Some(missing) = inner.missing_reference(&[(FavoriteKind::Artist, &album.artist_id)])
        {
            return Ok(missing);
        }
        replace(&mut inner.albums, |a| a.id == album.id, album.clone());
        Ok(StoreWrite::Written)
    }

    fn remove_album(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let Some(pos) = inner.albums.iter().position(|a| a.id == id) else {
            return Ok(false);
        };
        inner.albums.remove(pos);
        for track in inner.tracks.iter_mut() {
            if track.album_id.as_deref() == Some(id) {
                track.album_id = None;
            }
        }
        inner.drop_favorite(FavoriteKind::Album, id);
        Ok(true)
    }

    fn list_tracks(&self) -> Result<Vec<Track>> {
        Ok(self.inner.lock().unwrap().tracks.clone())
    }

    fn get_track(&self, id: &str) -> Result<Option<Track>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.tracks.iter().find(|t| t.id == id).cloned())
    }

    fn insert_track(&self, track: &Track) -> Result<StoreWrite> {
        let mut inner = self.inner.lock().unwrap();
        if inner.contains(FavoriteKind::Track, &track.id) {
            anyhow::bail!("Track with id '{}' already exists", track.id);
        }
        if let Some(missing) = inner.missing_reference(&[
            (FavoriteKind::Artist, &track.artist_id),
            (FavoriteKind::Album, &track.album_id),
        ]) {
            return Ok(missing);
        }
        inner.tracks.push(track.clone());
        Ok(StoreWrite::Written)
    }

    fn update_track(&self, track: &Track) -> Result<StoreWrite> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.contains(FavoriteKind::Track, &track.id) {
            return Ok(StoreWrite::Missing);
        }
        if let Some(missing) = inner.missing_reference(&[
            (FavoriteKind::Artist, &track.artist_id),
            (FavoriteKind::Album, &track.album_id),
        ]) {
            return Ok(missing);
        }
        replace(&mut inner.tracks, |t| t.id == track.id, track.clone());
        Ok(StoreWrite::Written)
    }

    fn remove_track(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let Some(pos) = inner.tracks.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        inner.tracks.remove(pos);
        inner.drop_favorite(FavoriteKind::Track, id);
        Ok(true)
    }

    fn list_favorites(&self) -> Result<Favorites> {
        let inner = self.inner.lock().unwrap();
        let mut favorites = Favorites::default();
        for (kind, id) in &inner.favorites {
            match kind {
                FavoriteKind::Artist => {
                    if let Some(artist) = inner.artists.iter().find(|a| &a.id == id) {
                        favorites.artists.push(artist.clone());
                    }
                }
                FavoriteKind::Album => {
                    if let Some(album) = inner.albums.iter().find(|a| &a.id == id) {
                        favorites.albums.push(album.clone());
                    }
                }
                FavoriteKind::Track => {
                    if let Some(track) = inner.tracks.iter().find(|t| &t.id == id) {
                        favorites.tracks.push(track.clone());
                    }
                }
            }
        }
        Ok(favorites)
    }

    fn add_favorite(&self, kind: FavoriteKind, entity_id: &str) -> Result<FavoriteAdd> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.contains(kind, entity_id) {
            return Ok(FavoriteAdd::MissingEntity);
        }
        if inner
            .favorites
            .iter()
            .any(|(k, id)| *k == kind && id == entity_id)
        {
            return Ok(FavoriteAdd::AlreadyFavorite);
        }
        inner.favorites.push((kind, entity_id.to_string()));
        Ok(FavoriteAdd::Added)
    }

    fn remove_favorite(&self, kind: FavoriteKind, entity_id: &str) -> Result<bool> {
        Ok(self.inner.lock().unwrap().drop_favorite(kind, entity_id))
    }
}
