use crate::error::{ServiceError, ServiceResult};
use crate::library::{FavoriteAdd, FavoriteKind, Favorites, LibraryStore};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct FavoritesService {
    store: Arc<dyn LibraryStore>,
}

impl FavoritesService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        FavoritesService { store }
    }

    pub fn find_all(&self) -> ServiceResult<Favorites> {
        Ok(self.store.list_favorites()?)
    }

    /// Adding an entity that is already a favorite succeeds without changes.
    pub fn add(&self, kind: FavoriteKind, id: &str) -> ServiceResult<()> {
        match self.store.add_favorite(kind, id)? {
            FavoriteAdd::Added => {
                debug!("Added {} {} to favorites", kind, id);
                Ok(())
            }
            FavoriteAdd::AlreadyFavorite => Ok(()),
            FavoriteAdd::MissingEntity => Err(ServiceError::UnprocessableEntity(format!(
                "{} does not exist",
                kind.label()
            ))),
        }
    }

    pub fn remove(&self, kind: FavoriteKind, id: &str) -> ServiceResult<()> {
        if !self.store.remove_favorite(kind, id)? {
            return Err(ServiceError::not_found(format!(
                "{} is not in favorites",
                kind.label()
            )));
        }
        Ok(())
    }

    pub fn add_artist(&self, id: &str) -> ServiceResult<()> {
        self.add(FavoriteKind::Artist, id)
    }

    pub fn add_album(&self, id: &str) -> ServiceResult<()> {
        self.add(FavoriteKind::Album, id)
    }

    pub fn add_track(&self, id: &str) -> ServiceResult<()> {
        self.add(FavoriteKind::Track, id)
    }

    pub fn remove_artist(&self, id: &str) -> ServiceResult<()> {
        self.remove(FavoriteKind::Artist, id)
    }

    pub fn remove_album(&self, id: &str) -> ServiceResult<()> {
        self.remove(FavoriteKind::Album, id)
    }

    pub fn remove_track(&self, id: &str) -> ServiceResult<()> {
        self.remove(FavoriteKind::Track, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{MemoryLibraryStore, TrackInput};
    use crate::services::TrackService;

    fn setup() -> (FavoritesService, TrackService) {
        let store: Arc<dyn LibraryStore> = Arc::new(MemoryLibraryStore::new());
        (
            FavoritesService::new(store.clone()),
            TrackService::new(store),
        )
    }

    #[test]
    fn missing_track_is_unprocessable() {
        let (favorites, _) = setup();
        let err = favorites.add_track(&crate::services::new_id()).unwrap_err();
        assert!(
            matches!(err, ServiceError::UnprocessableEntity(ref m) if m == "Track does not exist")
        );
    }

    #[test]
    fn add_is_idempotent_and_remove_reports_absence() {
        let (favorites, tracks) = setup();
        let track = tracks
            .create(TrackInput {
                name: "Innuendo".to_string(),
                artist_id: None,
                album_id: None,
                duration: 391,
            })
            .unwrap();

        favorites.add_track(&track.id).unwrap();
        favorites.add_track(&track.id).unwrap();
        assert_eq!(favorites.find_all().unwrap().tracks, vec![track.clone()]);

        favorites.remove_track(&track.id).unwrap();
        let err = favorites.remove_track(&track.id).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Track is not in favorites"));
    }

    #[test]
    fn deleted_track_disappears_from_favorites() {
        let (favorites, tracks) = setup();
        let track = tracks
            .create(TrackInput {
                name: "x".to_string(),
                artist_id: None,
                album_id: None,
                duration: 1,
            })
            .unwrap();
        favorites.add_track(&track.id).unwrap();
        tracks.remove(&track.id).unwrap();
        assert_eq!(favorites.find_all().unwrap(), Favorites::default());
    }
}
