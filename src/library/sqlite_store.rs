use super::models::{Album, Artist, FavoriteKind, Favorites, Track};
use super::schema::LIBRARY_VERSIONED_SCHEMAS;
use super::store::{FavoriteAdd, LibraryStore, StoreWrite};
use crate::sqlite_persistence::{open_in_memory, open_versioned};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

pub struct SqliteLibraryStore {
    conn: Arc<Mutex<Connection>>,
}

fn table_for(kind: FavoriteKind) -> &'static str {
    match kind {
        FavoriteKind::Artist => "artists",
        FavoriteKind::Album => "albums",
        FavoriteKind::Track => "tracks",
    }
}

fn artist_from_row(row: &Row) -> rusqlite::Result<Artist> {
    Ok(Artist {
        id: row.get(0)?,
        name: row.get(1)?,
        grammy: row.get(2)?,
    })
}

fn album_from_row(row: &Row) -> rusqlite::Result<Album> {
    Ok(Album {
        id: row.get(0)?,
        name: row.get(1)?,
        year: row.get(2)?,
        artist_id: row.get(3)?,
    })
}

fn track_from_row(row: &Row) -> rusqlite::Result<Track> {
    Ok(Track {
        id: row.get(0)?,
        name: row.get(1)?,
        artist_id: row.get(2)?,
        album_id: row.get(3)?,
        duration: row.get(4)?,
    })
}

fn row_exists(conn: &Connection, kind: FavoriteKind, id: &str) -> Result<bool> {
    let exists = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", table_for(kind)),
        params![id],
        |r| r.get(0),
    )?;
    Ok(exists)
}

/// Returns the first reference in `refs` that does not resolve.
fn missing_reference(
    conn: &Connection,
    refs: &[(FavoriteKind, &Option<String>)],
) -> Result<Option<StoreWrite>> {
    for (kind, id) in refs {
        if let Some(id) = id {
            if !row_exists(conn, *kind, id)? {
                return Ok(Some(StoreWrite::MissingReference(*kind, id.clone())));
            }
        }
    }
    Ok(None)
}

impl SqliteLibraryStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = open_versioned(db_path.as_ref(), LIBRARY_VERSIONED_SCHEMAS)?;
        info!("Library db ready at {:?}", db_path.as_ref());
        Ok(SqliteLibraryStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Ok(SqliteLibraryStore {
            conn: Arc::new(Mutex::new(open_in_memory(LIBRARY_VERSIONED_SCHEMAS)?)),
        })
    }

    fn in_transaction<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.conn.lock().unwrap();
        conn.execute("BEGIN IMMEDIATE", [])?;
        match f(&conn) {
            Ok(value) => {
                conn.execute("COMMIT", [])?;
                Ok(value)
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    fn query_all<T>(
        &self,
        sql: &str,
        map: fn(&Row) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], map)?.collect::<rusqlite::Result<Vec<T>>>()?;
        Ok(rows)
    }

    fn query_one<T>(
        &self,
        sql: &str,
        id: &str,
        map: fn(&Row) -> rusqlite::Result<T>,
    ) -> Result<Option<T>> {
        let conn = self.conn.lock().unwrap();
        Ok(conn.query_row(sql, params![id], map).optional()?)
    }
}

impl LibraryStore for SqliteLibraryStore {
    fn list_artists(&self) -> Result<Vec<Artist>> {
        self.query_all(
            "SELECT id, name, grammy FROM artists ORDER BY rowid",
            artist_from_row,
        )
    }

    fn get_artist(&self, id: &str) -> Result<Option<Artist>> {
        self.query_one(
            "SELECT id, name, grammy FROM artists WHERE id = ?1",
            id,
            artist_from_row,
        )
    }

    fn insert_artist(&self, artist: &Artist) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO artists (id, name, grammy) VALUES (?1, ?2, ?3)",
            params![&artist.id, &artist.name, artist.grammy],
        )?;
        Ok(())
    }

    fn update_artist(&self, artist: &Artist) -> Result<StoreWrite> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE artists SET name = ?2, grammy = ?3 WHERE id = ?1",
            params![&artist.id, &artist.name, artist.grammy],
        )?;
        Ok(if updated == 0 {
            StoreWrite::Missing
        } else {
            StoreWrite::Written
        })
    }

    fn remove_artist(&self, id: &str) -> Result<bool> {
        self.in_transaction(|conn| {
            conn.execute(
                "DELETE FROM favorites WHERE entity_type = ?1 AND entity_id = ?2",
                params![FavoriteKind::Artist.as_str(), id],
            )?;
            conn.execute(
                "UPDATE albums SET artist_id = NULL WHERE artist_id = ?1",
                params![id],
            )?;
            conn.execute(
                "UPDATE tracks SET artist_id = NULL WHERE artist_id = ?1",
                params![id],
            )?;
            let deleted = conn.execute("DELETE FROM artists WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
    }

    fn list_albums(&self) -> Result<Vec<Album>> {
        self.query_all(
            "SELECT id, name, year, artist_id FROM albums ORDER BY rowid",
            album_from_row,
        )
    }

    fn get_album(&self, id: &str) -> Result<Option<Album>> {
        self.query_one(
            "SELECT id, name, year, artist_id FROM albums WHERE id = ?1",
            id,
            album_from_row,
        )
    }

    fn insert_album(&self, album: &Album) -> Result<StoreWrite> {
        self.in_transaction(|conn| {
            if let Some(missing) =
                missing_reference(conn, &[(FavoriteKind::Artist, &album.artist_id)])?
            {
                return Ok(missing);
            }
            conn.execute(
                "INSERT INTO albums (id, name, year, artist_id) VALUES (?1, ?2, ?3, ?4)",
                params![&album.id, &album.name, album.year, &album.artist_id],
            )?;
            Ok(StoreWrite::Written)
        })
    }

    fn update_album(&self, album: &Album) -> Result<StoreWrite> {
        self.in_transaction(|conn| {
            if !row_exists(conn, FavoriteKind::Album, &album.id)? {
                return Ok(StoreWrite::Missing);
            }
            if let Some(missing) =
                missing_reference(conn, &[(FavoriteKind::Artist, &album.artist_id)])?
            {
                return Ok(missing);
            }
            conn.execute(
                "UPDATE albums SET name = ?2, year = ?3, artist_id = ?4 WHERE id = ?1",
                params![&album.id, &album.name, album.year, &album.artist_id],
            )?;
            Ok(StoreWrite::Written)
        })
    }

    fn remove_album(&self, id: &str) -> Result<bool> {
        self.in_transaction(|conn| {
            conn.execute(
                "DELETE FROM favorites WHERE entity_type = ?1 AND entity_id = ?2",
                params![FavoriteKind::Album.as_str(), id],
            )?;
            conn.execute(
                "UPDATE tracks SET album_id = NULL WHERE album_id = ?1",
                params![id],
            )?;
            let deleted = conn.execute("DELETE FROM albums WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
    }

    fn list_tracks(&self) -> Result<Vec<Track>> {
        self.query_all(
            "SELECT id, name, artist_id, album_id, duration FROM tracks ORDER BY rowid",
            track_from_row,
        )
    }

    fn get_track(&self, id: &str) -> Result<Option<Track>> {
        self.query_one(
            "SELECT id, name, artist_id, album_id, duration FROM tracks WHERE id = ?1",
            id,
            track_from_row,
        )
    }

    fn insert_track(&self, track: &Track) -> Result<StoreWrite> {
        self.in_transaction(|conn| {
            if let Some(missing) = missing_reference(
                conn,
                &[
                    (FavoriteKind::Artist, &track.artist_id),
                    (FavoriteKind::Album, &track.album_id),
                ],
            )? {
                return Ok(missing);
            }
            conn.execute(
                "INSERT INTO tracks (id, name, artist_id, album_id, duration) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    &track.id,
                    &track.name,
                    &track.artist_id,
                    &track.album_id,
                    track.duration
                ],
            )?;
            Ok(StoreWrite::Written)
        })
    }

    fn update_track(&self, track: &Track) -> Result<StoreWrite> {
        self.in_transaction(|conn| {
            if !row_exists(conn, FavoriteKind::Track, &track.id)? {
                return Ok(StoreWrite::Missing);
            }
            if let Some(missing) = missing_reference(
                conn,
                &[
                    (FavoriteKind::Artist, &track.artist_id),
                    (FavoriteKind::Album, &track.album_id),
                ],
            )? {
                return Ok(missing);
            }
            conn.execute(
                "UPDATE tracks SET name = ?2, artist_id = ?3, album_id = ?4, duration = ?5 \
                 WHERE id = ?1",
                params![
                    &track.id,
                    &track.name,
                    &track.artist_id,
                    &track.album_id,
                    track.duration
                ],
            )?;
            Ok(StoreWrite::Written)
        })
    }

    fn remove_track(&self, id: &str) -> Result<bool> {
        self.in_transaction(|conn| {
            conn.execute(
                "DELETE FROM favorites WHERE entity_type = ?1 AND entity_id = ?2",
                params![FavoriteKind::Track.as_str(), id],
            )?;
            let deleted = conn.execute("DELETE FROM tracks WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
    }

    fn list_favorites(&self) -> Result<Favorites> {
        Ok(Favorites {
            artists: self.query_all(
                "SELECT a.id, a.name, a.grammy FROM favorites f \
                 JOIN artists a ON a.id = f.entity_id \
                 WHERE f.entity_type = 'artist' ORDER BY f.rowid",
                artist_from_row,
            )?,
            albums: self.query_all(
                "SELECT a.id, a.name, a.year, a.artist_id FROM favorites f \
                 JOIN albums a ON a.id = f.entity_id \
                 WHERE f.entity_type = 'album' ORDER BY f.rowid",
                album_from_row,
            )?,
            tracks: self.query_all(
                "SELECT t.id, t.name, t.artist_id, t.album_id, t.duration FROM favorites f \
                 JOIN tracks t ON t.id = f.entity_id \
                 WHERE f.entity_type = 'track' ORDER BY f.rowid",
                track_from_row,
            )?,
        })
    }

    fn add_favorite(&self, kind: FavoriteKind, entity_id: &str) -> Result<FavoriteAdd> {
        self.in_transaction(|conn| {
            if !row_exists(conn, kind, entity_id)? {
                return Ok(FavoriteAdd::MissingEntity);
            }
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO favorites (id, entity_id, entity_type) VALUES (?1, ?2, ?3)",
                params![uuid::Uuid::new_v4().to_string(), entity_id, kind.as_str()],
            )?;
            Ok(if inserted == 0 {
                FavoriteAdd::AlreadyFavorite
            } else {
                FavoriteAdd::Added
            })
        })
    }

    fn remove_favorite(&self, kind: FavoriteKind, entity_id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute(
            "DELETE FROM favorites WHERE entity_type = ?1 AND entity_id = ?2",
            params![kind.as_str(), entity_id],
        )?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn artist(id: &str) -> Artist {
        Artist {
            id: id.to_string(),
            name: format!("artist {}", id),
            grammy: false,
        }
    }

    fn album(id: &str, artist_id: Option<&str>) -> Album {
        Album {
            id: id.to_string(),
            name: format!("album {}", id),
            year: 2001,
            artist_id: artist_id.map(str::to_string),
        }
    }

    fn track(id: &str, artist_id: Option<&str>, album_id: Option<&str>) -> Track {
        Track {
            id: id.to_string(),
            name: format!("track {}", id),
            artist_id: artist_id.map(str::to_string),
            album_id: album_id.map(str::to_string),
            duration: 200,
        }
    }

    #[test]
    fn artist_crud() {
        let store = SqliteLibraryStore::in_memory().unwrap();
        store.insert_artist(&artist("a1")).unwrap();
        assert_eq!(store.get_artist("a1").unwrap(), Some(artist("a1")));

        let mut renamed = artist("a1");
        renamed.name = "Renamed".to_string();
        renamed.grammy = true;
        assert_eq!(store.update_artist(&renamed).unwrap(), StoreWrite::Written);
        assert_eq!(store.get_artist("a1").unwrap(), Some(renamed));
        assert_eq!(
            store.update_artist(&artist("nope")).unwrap(),
            StoreWrite::Missing
        );

        assert!(store.remove_artist("a1").unwrap());
        assert!(!store.remove_artist("a1").unwrap());
        assert!(store.list_artists().unwrap().is_empty());
    }

    #[test]
    fn removing_artist_nulls_references_and_favorite() {
        let store = SqliteLibraryStore::in_memory().unwrap();
        store.insert_artist(&artist("a1")).unwrap();
        store.insert_album(&album("al1", Some("a1"))).unwrap();
        store
            .insert_track(&track("t1", Some("a1"), Some("al1")))
            .unwrap();
        store.add_favorite(FavoriteKind::Artist, "a1").unwrap();

        assert!(store.remove_artist("a1").unwrap());

        assert_eq!(store.get_album("al1").unwrap().unwrap().artist_id, None);
        let t = store.get_track("t1").unwrap().unwrap();
        assert_eq!(t.artist_id, None);
        assert_eq!(t.album_id, Some("al1".to_string()));
        assert!(!store.remove_favorite(FavoriteKind::Artist, "a1").unwrap());
    }

    #[test]
    fn removing_album_nulls_track_album() {
        let store = SqliteLibraryStore::in_memory().unwrap();
        store.insert_album(&album("al1", None)).unwrap();
        store.insert_track(&track("t1", None, Some("al1"))).unwrap();
        store.add_favorite(FavoriteKind::Album, "al1").unwrap();

        assert!(store.remove_album("al1").unwrap());
        assert_eq!(store.get_track("t1").unwrap().unwrap().album_id, None);
        assert!(store.list_favorites().unwrap().albums.is_empty());
    }

    #[test]
    fn rejects_dangling_references() {
        let store = SqliteLibraryStore::in_memory().unwrap();
        assert_eq!(
            store.insert_album(&album("al1", Some("ghost"))).unwrap(),
            StoreWrite::MissingReference(FavoriteKind::Artist, "ghost".to_string())
        );
        assert!(store.get_album("al1").unwrap().is_none());

        store.insert_track(&track("t1", None, None)).unwrap();
        assert_eq!(
            store
                .update_track(&track("t1", None, Some("ghost")))
                .unwrap(),
            StoreWrite::MissingReference(FavoriteKind::Album, "ghost".to_string())
        );
    }

    #[test]
    fn favorites_are_unique_and_require_entity() {
        let store = SqliteLibraryStore::in_memory().unwrap();
        assert_eq!(
            store.add_favorite(FavoriteKind::Track, "t1").unwrap(),
            FavoriteAdd::MissingEntity
        );
        store.insert_track(&track("t1", None, None)).unwrap();
        assert_eq!(
            store.add_favorite(FavoriteKind::Track, "t1").unwrap(),
            FavoriteAdd::Added
        );
        assert_eq!(
            store.add_favorite(FavoriteKind::Track, "t1").unwrap(),
            FavoriteAdd::AlreadyFavorite
        );
        assert_eq!(store.list_favorites().unwrap().tracks.len(), 1);

        assert!(store.remove_favorite(FavoriteKind::Track, "t1").unwrap());
        assert!(!store.remove_favorite(FavoriteKind::Track, "t1").unwrap());
    }

    #[test]
    fn data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.db");
        {
            let store = SqliteLibraryStore::new(&path).unwrap();
            store.insert_artist(&artist("a1")).unwrap();
            store.add_favorite(FavoriteKind::Artist, "a1").unwrap();
        }
        let store = SqliteLibraryStore::new(&path).unwrap();
        assert_eq!(store.list_favorites().unwrap().artists, vec![artist("a1")]);
    }
}
