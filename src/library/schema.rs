use crate::sqlite_column;
use crate::sqlite_persistence::{ForeignKey, SqlType, Table, VersionedSchema};

const ARTIST_FK: ForeignKey = ForeignKey {
    foreign_table: "artists",
    foreign_column: "id",
};

const ALBUM_FK: ForeignKey = ForeignKey {
    foreign_table: "albums",
    foreign_column: "id",
};

const ARTISTS_TABLE_V0: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("id", SqlType::Text, is_primary_key = true),
        sqlite_column!("name", SqlType::Text, non_null = true),
        sqlite_column!(
            "grammy",
            SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
    ],
    indices: &[],
    unique_constraints: &[],
};

const ALBUMS_TABLE_V0: Table = Table {
    name: "albums",
    columns: &[
        sqlite_column!("id", SqlType::Text, is_primary_key = true),
        sqlite_column!("name", SqlType::Text, non_null = true),
        sqlite_column!("year", SqlType::Integer, non_null = true),
        sqlite_column!("artist_id", SqlType::Text, foreign_key = Some(&ARTIST_FK)),
    ],
    indices: &[("idx_albums_artist_id", "artist_id")],
    unique_constraints: &[],
};

const TRACKS_TABLE_V0: Table = Table {
    name: "tracks",
    columns: &[
        sqlite_column!("id", SqlType::Text, is_primary_key = true),
        sqlite_column!("name", SqlType::Text, non_null = true),
        sqlite_column!("artist_id", SqlType::Text, foreign_key = Some(&ARTIST_FK)),
        sqlite_column!("album_id", SqlType::Text, foreign_key = Some(&ALBUM_FK)),
        sqlite_column!("duration", SqlType::Integer, non_null = true),
    ],
    indices: &[
        ("idx_tracks_artist_id", "artist_id"),
        ("idx_tracks_album_id", "album_id"),
    ],
    unique_constraints: &[],
};

const FAVORITES_TABLE_V0: Table = Table {
    name: "favorites",
    columns: &[
        sqlite_column!("id", SqlType::Text, is_primary_key = true),
        sqlite_column!("entity_id", SqlType::Text, non_null = true),
        sqlite_column!("entity_type", SqlType::Text, non_null = true),
    ],
    indices: &[],
    unique_constraints: &[&["entity_type", "entity_id"]],
};

pub const LIBRARY_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        ARTISTS_TABLE_V0,
        ALBUMS_TABLE_V0,
        TRACKS_TABLE_V0,
        FAVORITES_TABLE_V0,
    ],
}];
