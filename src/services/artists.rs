use super::{check_write, new_id};
use crate::error::{ServiceError, ServiceResult};
use crate::library::{Artist, ArtistInput, LibraryStore};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ArtistService {
    store: Arc<dyn LibraryStore>,
}

impl ArtistService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        ArtistService { store }
    }

    pub fn create(&self, input: ArtistInput) -> ServiceResult<Artist> {
        let artist = Artist {
            id: new_id(),
            name: input.name,
            grammy: input.grammy,
        };
        self.store.insert_artist(&artist)?;
        debug!("Created artist {}", artist.id);
        Ok(artist)
    }

    pub fn find_all(&self) -> ServiceResult<Vec<Artist>> {
        Ok(self.store.list_artists()?)
    }

    pub fn find_one(&self, id: &str) -> ServiceResult<Artist> {
        self.store
            .get_artist(id)?
            .ok_or_else(|| ServiceError::not_found("Artist not found"))
    }

    pub fn update(&self, id: &str, input: ArtistInput) -> ServiceResult<Artist> {
        let artist = Artist {
            id: id.to_string(),
            name: input.name,
            grammy: input.grammy,
        };
        check_write(self.store.update_artist(&artist)?, "Artist")?;
        Ok(artist)
    }

    pub fn remove(&self, id: &str) -> ServiceResult<()> {
        if !self.store.remove_artist(id)? {
            return Err(ServiceError::not_found("Artist not found"));
        }
        debug!("Removed artist {}", id);
        Ok(())
    }

    pub fn exists(&self, id: &str) -> ServiceResult<bool> {
        Ok(self.store.get_artist(id)?.is_some())
    }
}
