use super::{check_write, new_id, normalize_reference};
use crate::error::{ServiceError, ServiceResult};
use crate::library::{LibraryStore, Track, TrackInput};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct TrackService {
    store: Arc<dyn LibraryStore>,
}

impl TrackService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        TrackService { store }
    }

    fn build(id: String, input: TrackInput) -> Track {
        Track {
            id,
            name: input.name,
            artist_id: normalize_reference(input.artist_id),
            album_id: normalize_reference(input.album_id),
            duration: input.duration,
        }
    }

    pub fn create(&self, input: TrackInput) -> ServiceResult<Track> {
        let track = Self::build(new_id(), input);
        check_write(self.store.insert_track(&track)?, "Track")?;
        debug!("Created track {}", track.id);
        Ok(track)
    }

    pub fn find_all(&self) -> ServiceResult<Vec<Track>> {
        Ok(self.store.list_tracks()?)
    }

    pub fn find_one(&self, id: &str) -> ServiceResult<Track> {
        self.store
            .get_track(id)?
            .ok_or_else(|| ServiceError::not_found("Track not found"))
    }

    pub fn update(&self, id: &str, input: TrackInput) -> ServiceResult<Track> {
        let track = Self::build(id.to_string(), input);
        check_write(self.store.update_track(&track)?, "Track")?;
        Ok(track)
    }

    pub fn remove(&self, id: &str) -> ServiceResult<()> {
        if !self.store.remove_track(id)? {
            return Err(ServiceError::not_found("Track not found"));
        }
        debug!("Removed track {}", id);
        Ok(())
    }

    pub fn exists(&self, id: &str) -> ServiceResult<bool> {
        Ok(self.store.get_track(id)?.is_some())
    }
}
