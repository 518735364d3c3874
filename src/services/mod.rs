mod albums;
mod artists;
mod favorites;
mod tracks;
mod users;

pub use albums::AlbumService;
pub use artists::ArtistService;
pub use favorites::FavoritesService;
pub use tracks::TrackService;
pub use users::UserService;

use crate::error::{ServiceError, ServiceResult};
use crate::library::{FavoriteKind, StoreWrite};

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Stored ids are lowercase, so references from request bodies are matched
/// in the same form path ids are.
pub(crate) fn normalize_reference(id: Option<String>) -> Option<String> {
    id.map(|id| id.to_ascii_lowercase())
}

/// Maps a store write outcome to the service result for an entity named `label`.
fn check_write(write: StoreWrite, label: &str) -> ServiceResult<()> {
    match write {
        StoreWrite::Written => Ok(()),
        StoreWrite::Missing => Err(ServiceError::not_found(format!("{} not found", label))),
        StoreWrite::MissingReference(kind, id) => Err(missing_reference(kind, &id)),
    }
}

fn missing_reference(kind: FavoriteKind, id: &str) -> ServiceError {
    ServiceError::bad_request(format!("{} with id {} does not exist", kind.label(), id))
}
