mod memory_store;
mod models;
mod schema;
mod sqlite_store;
mod store;

pub use memory_store::MemoryLibraryStore;
pub use models::{
    Album, AlbumInput, Artist, ArtistInput, FavoriteKind, Favorites, Track, TrackInput,
};
pub use sqlite_store::SqliteLibraryStore;
pub use store::{FavoriteAdd, LibraryStore, StoreWrite};
