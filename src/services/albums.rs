use super::{check_write, new_id, normalize_reference};
use crate::error::{ServiceError, ServiceResult};
use crate::library::{Album, AlbumInput, LibraryStore};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct AlbumService {
    store: Arc<dyn LibraryStore>,
}

impl AlbumService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        AlbumService { store }
    }

    fn build(id: String, input: AlbumInput) -> Album {
        Album {
            id,
            name: input.name,
            year: input.year,
            artist_id: normalize_reference(input.artist_id),
        }
    }

    pub fn create(&self, input: AlbumInput) -> ServiceResult<Album> {
        let album = Self::build(new_id(), input);
        check_write(self.store.insert_album(&album)?, "Album")?;
        debug!("Created album {}", album.id);
        Ok(album)
    }

    pub fn find_all(&self) -> ServiceResult<Vec<Album>> {
        Ok(self.store.list_albums()?)
    }

    pub fn find_one(&self, id: &str) -> ServiceResult<Album> {
        self.store
            .get_album(id)?
            .ok_or_else(|| ServiceError::not_found("Album not found"))
    }

    pub fn update(&self, id: &str, input: AlbumInput) -> ServiceResult<Album> {
        let album = Self::build(id.to_string(), input);
        check_write(self.store.update_album(&album)?, "Album")?;
        Ok(album)
    }

    pub fn remove(&self, id: &str) -> ServiceResult<()> {
        if !self.store.remove_album(id)? {
            return Err(ServiceError::not_found("Album not found"));
        }
        debug!("Removed album {}", id);
        Ok(())
    }

    pub fn exists(&self, id: &str) -> ServiceResult<bool> {
        Ok(self.store.get_album(id)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{ArtistInput, MemoryLibraryStore};
    use crate::services::ArtistService;

    #[test]
    fn update_without_artist_clears_reference() {
        let store: Arc<dyn LibraryStore> = Arc::new(MemoryLibraryStore::new());
        let artists = ArtistService::new(store.clone());
        let albums = AlbumService::new(store);

        let artist = artists
            .create(ArtistInput {
                name: "Queen".to_string(),
                grammy: true,
            })
            .unwrap();
        let album = albums
            .create(AlbumInput {
                name: "Jazz".to_string(),
                year: 1978,
                artist_id: Some(artist.id.clone()),
            })
            .unwrap();
        assert_eq!(album.artist_id, Some(artist.id));

        let updated = albums
            .update(
                &album.id,
                AlbumInput {
                    name: "Jazz".to_string(),
                    year: 1979,
                    artist_id: None,
                },
            )
            .unwrap();
        assert_eq!(albums.find_one(&album.id).unwrap(), updated);
        assert_eq!(updated.artist_id, None);
    }

    #[test]
    fn unknown_artist_is_a_bad_request() {
        let albums = AlbumService::new(Arc::new(MemoryLibraryStore::new()));
        let ghost = new_id();
        let err = albums
            .create(AlbumInput {
                name: "Jazz".to_string(),
                year: 1978,
                artist_id: Some(ghost.clone()),
            })
            .unwrap_err();
        match err {
            ServiceError::BadRequest(message) => {
                assert_eq!(message, format!("Artist with id {} does not exist", ghost))
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(albums.find_all().unwrap().is_empty());
    }

    #[test]
    fn uppercase_artist_reference_matches() {
        let store: Arc<dyn LibraryStore> = Arc::new(MemoryLibraryStore::new());
        let artists = ArtistService::new(store.clone());
        let albums = AlbumService::new(store);

        let artist = artists
            .create(ArtistInput {
                name: "Queen".to_string(),
                grammy: false,
            })
            .unwrap();
        let album = albums
            .create(AlbumInput {
                name: "Innuendo".to_string(),
                year: 1991,
                artist_id: Some(artist.id.to_uppercase()),
            })
            .unwrap();
        assert_eq!(album.artist_id, Some(artist.id));
    }
}
